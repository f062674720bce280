//! Entry panel service
//!
//! Turns user actions on the entry list (add child, append, insert, delete,
//! copy, paste, select) into synchronizer edits, clipboard traffic and
//! notifications. The panel holds the document's authoritative flat
//! collection and replaces it with the synchronizer's output after every edit.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::{ApplicationResult, Event, IoResultExt};
use crate::domain::{Entry, EntryTree, InsertPosition, NodeId};
use crate::infrastructure::traits::{Clipboard, Notifier};

/// Which actions apply to the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub copy: bool,
    pub paste: bool,
    pub delete: bool,
    pub append: bool,
    pub insert: bool,
    pub add_child: bool,
}

pub struct EntryPanel {
    tree: EntryTree,
    document: Vec<Entry>,
    selection: Option<NodeId>,
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
}

impl EntryPanel {
    /// Open a panel over a document's flat collection.
    ///
    /// The collection is reindexed on load; nothing is selected.
    pub fn new(
        entries: Vec<Entry>,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> ApplicationResult<Self> {
        let tree = EntryTree::from_entries(entries)?;
        let document = tree.entries();
        Ok(Self {
            tree,
            document,
            selection: None,
            clipboard,
            notifier,
        })
    }

    /// The document's current flat collection.
    pub fn document(&self) -> &[Entry] {
        &self.document
    }

    pub fn into_document(self) -> Vec<Entry> {
        self.document
    }

    pub fn tree(&self) -> &EntryTree {
        &self.tree
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selection.and_then(|node| self.tree.entry(node))
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selection.and_then(|node| self.tree.position_of(node))
    }

    /// Select the entry at pre-order `position` and load it into dependent views.
    pub fn select(&mut self, position: usize) -> Option<&Entry> {
        let node = self.tree.node_at(position)?;
        self.selection = Some(node);
        self.on_select();
        self.tree.entry(node)
    }

    /// Handler for `selection-changed`: push the selected entry to dependent views.
    pub fn on_select(&self) {
        if let Some(entry) = self.selected_entry() {
            self.notifier.publish(Event::DataLoaded(entry.clone()));
        }
    }

    pub fn actions(&self) -> Actions {
        let Some(node) = self.selection else {
            return Actions::default();
        };
        let enabled = !self.tree.is_root(node);
        Actions {
            copy: enabled,
            paste: enabled && self.clipboard.has_entries(),
            delete: enabled,
            append: enabled,
            insert: enabled,
            add_child: true,
        }
    }

    /// Add clipboard entries (or one blank entry) as last child of the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self) -> ApplicationResult<usize> {
        let Some(item) = self.selection else {
            return Ok(0);
        };
        let count = self.add_entries(item, InsertPosition::Last)?;
        self.status(format!(
            "Added {} entry(s) under {}",
            count,
            self.tree.label(item)
        ));
        Ok(count)
    }

    /// Add clipboard entries (or one blank entry) right after the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn append(&mut self) -> ApplicationResult<usize> {
        let Some(item) = self.selection else {
            return Ok(0);
        };
        let Some(parent) = self.tree.parent_of(item) else {
            self.status("Cannot add entry next to root entry, must be a child");
            return Ok(0);
        };
        let count = self.add_entries(parent, InsertPosition::After(item))?;
        self.status(format!(
            "Added {} entry(s) after {}",
            count,
            self.tree.label(item)
        ));
        Ok(count)
    }

    /// Add clipboard entries (or one blank entry) right before the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self) -> ApplicationResult<usize> {
        let Some(item) = self.selection else {
            return Ok(0);
        };
        let Some(parent) = self.tree.parent_of(item) else {
            self.status("Cannot add entry before root entry.");
            return Ok(0);
        };
        let count = self.add_entries(parent, InsertPosition::Before(item))?;
        self.status(format!(
            "Added {} entry(s) before {}",
            count,
            self.tree.label(item)
        ));
        Ok(count)
    }

    /// Delete the selection, with its children if `cascade`.
    ///
    /// Returns the number of entries removed; 0 when nothing or the root is
    /// selected.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, cascade: bool) -> usize {
        let Some(item) = self.selection else {
            return 0;
        };
        let Some(removal) = self.tree.delete_node(item, cascade) else {
            return 0;
        };
        self.document = removal.entries;
        self.selection = None;
        self.notifier.publish(Event::DisableView);
        self.status(format!("Deleted {} entries", removal.removed));
        removal.removed
    }

    /// Put the selection (and its descendants if `include_children`) on the clipboard.
    #[instrument(level = "debug", skip(self))]
    pub fn copy(&self, include_children: bool) -> ApplicationResult<usize> {
        let Some(item) = self.selection else {
            return Ok(0);
        };
        let Some(entries) = self.tree.copy_subtree(item, include_children) else {
            return Ok(0);
        };
        self.clipboard
            .write_entries(&entries)
            .with_context("write clipboard")?;

        let mut msg = format!("Copied {}", self.tree.label(item));
        if entries.len() > 1 {
            msg.push_str(&format!(" and {} children", entries.len() - 1));
        }
        self.status(msg);
        Ok(entries.len())
    }

    /// Overwrite the selection's payload with the first clipboard entry.
    ///
    /// Returns false when nothing happened: no selection, root selected, or
    /// no compatible clipboard data.
    #[instrument(level = "debug", skip(self))]
    pub fn paste(&mut self) -> ApplicationResult<bool> {
        let Some(item) = self.selection else {
            return Ok(false);
        };
        if self.tree.is_root(item) {
            return Ok(false);
        }
        let Some(entries) = self
            .clipboard
            .read_entries()
            .with_context("read clipboard")?
        else {
            return Ok(false);
        };
        let Some(document) = self.tree.paste_over(item, &entries) else {
            return Ok(false);
        };
        self.document = document;
        self.on_select();
        self.status(format!("Pasted to {}", self.tree.label(item)));
        Ok(true)
    }

    fn add_entries(&mut self, parent: NodeId, position: InsertPosition) -> ApplicationResult<usize> {
        let entries = self
            .clipboard
            .read_entries()
            .with_context("read clipboard")?
            .filter(|entries| !entries.is_empty())
            .unwrap_or_else(|| vec![Entry::zeroed()]);

        let Some(insertion) = self.tree.insert_subtree(parent, position, entries) else {
            return Ok(0);
        };
        self.document = insertion.entries;
        self.selection = Some(insertion.root);
        if let Some(entry) = self.tree.entry(insertion.root) {
            self.notifier
                .publish(Event::SelectionChanged(entry.clone()));
        }
        self.on_select();
        Ok(insertion.count)
    }

    fn status(&self, text: impl Into<String>) {
        let text = text.into();
        info!("{}", text);
        self.notifier.publish(Event::StatusText(text));
    }
}
