//! Entry tree synchronizer.
//!
//! Keeps an ordered tree of entries and derives the flat, address-linked
//! table from it. The tree is the source of truth during edits; address
//! fields are only written by [`EntryTree::reindex`], which runs after every
//! structural change.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::address::{address_to_index, index_to_address, Address, NO_ADDRESS};
use crate::domain::arena::EntryArena;
use crate::domain::entry::Entry;
use crate::domain::error::{DomainError, DomainResult};

/// Where a new subtree goes among a parent's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    First,
    Before(Index),
    After(Index),
    Last,
}

/// Outcome of [`EntryTree::insert_subtree`].
#[derive(Debug, Clone)]
pub struct Insertion {
    /// Node holding the first inserted entry
    pub root: Index,
    /// Number of entries inserted
    pub count: usize,
    /// Flat collection after the reindex
    pub entries: Vec<Entry>,
}

/// Outcome of [`EntryTree::delete_node`].
#[derive(Debug, Clone)]
pub struct Removal {
    /// Number of entries removed
    pub removed: usize,
    /// Flat collection after the reindex
    pub entries: Vec<Entry>,
}

#[derive(Debug)]
pub struct EntryTree {
    arena: EntryArena,
}

impl EntryTree {
    /// Build a tree from a flat collection in pre-order.
    ///
    /// The first entry is the root; every other entry is attached to the
    /// entry whose address equals its `parent`, which must appear earlier.
    /// The resulting tree is reindexed.
    #[instrument(level = "debug", skip(entries), fields(count = entries.len()))]
    pub fn from_entries(entries: Vec<Entry>) -> DomainResult<Self> {
        let mut entries = entries.into_iter();
        let first = entries.next().ok_or(DomainError::EmptyCollection)?;
        if first.parent != NO_ADDRESS {
            return Err(DomainError::RootHasParent {
                address: first.address,
                parent: first.parent,
            });
        }

        let mut arena = EntryArena::new();
        let mut placed: HashMap<Address, Index> = HashMap::new();
        let root_address = first.address;
        placed.insert(root_address, arena.insert_root(first));

        for entry in entries {
            let (address, parent) = (entry.address, entry.parent);
            if parent == NO_ADDRESS {
                return Err(DomainError::MultipleRoots(address));
            }
            let parent_idx = *placed
                .get(&parent)
                .ok_or(DomainError::DanglingParent { address, parent })?;
            let idx = arena
                .append_child(entry, parent_idx)
                .ok_or(DomainError::DanglingParent { address, parent })?;
            if placed.insert(address, idx).is_some() {
                return Err(DomainError::DuplicateAddress(address));
            }
        }

        let mut tree = Self { arena };
        tree.reindex();
        Ok(tree)
    }

    /// Recompute every address and link from the current tree shape.
    ///
    /// First pass numbers the nodes in pre-order, second pass fills
    /// `sibling`, `child`, `parent` and `root` from the neighbours' fresh
    /// addresses. The returned collection is the new authoritative table.
    #[instrument(level = "debug", skip(self))]
    pub fn reindex(&mut self) -> Vec<Entry> {
        let order: Vec<Index> = self.arena.iter().map(|(idx, _)| idx).collect();

        for (position, &idx) in order.iter().enumerate() {
            if let Some(node) = self.arena.get_node_mut(idx) {
                node.entry.address = index_to_address(position);
            }
        }

        let root = self.arena.root();
        let mut top_level = NO_ADDRESS;
        let mut flat = Vec::with_capacity(order.len());
        for &idx in &order {
            let parent = self.arena.parent_of(idx);
            let sibling = self.address_of(self.arena.next_sibling(idx));
            let child = self.address_of(self.arena.first_child(idx));
            let parent_address = self.address_of(parent);

            let Some(node) = self.arena.get_node_mut(idx) else {
                continue;
            };
            if parent.is_some() && parent == root {
                top_level = node.entry.address;
            }
            node.entry.sibling = sibling;
            node.entry.child = child;
            node.entry.parent = parent_address;
            node.entry.root = top_level;
            flat.push(node.entry.clone());
        }

        debug!("reindexed {} entries", flat.len());
        flat
    }

    /// Insert `entries` as a new subtree under `parent`.
    ///
    /// `entries[0]` is attached at `position`. The rest are attached under
    /// whichever already inserted entry their stale `parent` address names;
    /// those stale addresses only matter until the reindex overwrites them.
    /// A sibling that is not a child of `parent` degrades to `Last`.
    #[instrument(level = "debug", skip(self, entries), fields(count = entries.len()))]
    pub fn insert_subtree(
        &mut self,
        parent: Index,
        position: InsertPosition,
        entries: Vec<Entry>,
    ) -> Option<Insertion> {
        let parent_node = self.arena.get_node(parent)?;
        let end = parent_node.children.len();
        let slot_of = |sibling: Index| parent_node.children.iter().position(|&c| c == sibling);
        let slot = match position {
            InsertPosition::First => 0,
            InsertPosition::Last => end,
            InsertPosition::Before(sibling) => slot_of(sibling).unwrap_or(end),
            InsertPosition::After(sibling) => slot_of(sibling).map_or(end, |s| s + 1),
        };

        let count = entries.len();
        let mut entries = entries.into_iter();
        let head = entries.next()?;
        let mut placed: HashMap<Address, Index> = HashMap::new();
        let head_address = head.address;
        let subtree_root = self.arena.insert_child(head, parent, slot)?;
        placed.insert(head_address, subtree_root);

        for entry in entries {
            let attach_to = match placed.get(&entry.parent) {
                Some(&idx) => idx,
                None => {
                    warn!(
                        "stale parent {:#x} of entry {:#x} not in pasted subtree, attaching to its root",
                        entry.parent, entry.address
                    );
                    subtree_root
                }
            };
            let address = entry.address;
            if let Some(idx) = self.arena.append_child(entry, attach_to) {
                placed.insert(address, idx);
            }
        }

        let entries = self.reindex();
        Some(Insertion {
            root: subtree_root,
            count,
            entries,
        })
    }

    /// Remove `node`, with its subtree if `cascade`, else promote its children.
    ///
    /// Without cascade the children take the node's place among its siblings
    /// in their original order: they inherit the node's parent, the link that
    /// pointed at the node now points at its first child, and the last child
    /// continues with the node's next sibling. The root is never removed.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, node: Index, cascade: bool) -> Option<Removal> {
        if self.is_root(node) || self.arena.get_node(node).is_none() {
            return None;
        }
        let removed = if cascade {
            self.arena.remove_subtree(node)
        } else {
            self.arena.splice_out(node).map_or(0, |_| 1)
        };
        let entries = self.reindex();
        Some(Removal { removed, entries })
    }

    /// Snapshot of `node` and, if `include_children`, its descendants.
    ///
    /// The root cannot be copied.
    #[instrument(level = "debug", skip(self))]
    pub fn copy_subtree(&self, node: Index, include_children: bool) -> Option<Vec<Entry>> {
        if self.is_root(node) {
            return None;
        }
        let entry = self.entry(node)?;
        if include_children {
            Some(self.get_subtree_entries(node))
        } else {
            Some(vec![entry.clone()])
        }
    }

    /// Overwrite the payload of `node` with the payload of `entries[0]`.
    ///
    /// Links and address of `node` stay as they are. The root cannot be
    /// pasted over.
    #[instrument(level = "debug", skip(self, entries))]
    pub fn paste_over(&mut self, node: Index, entries: &[Entry]) -> Option<Vec<Entry>> {
        if self.is_root(node) {
            return None;
        }
        let source = entries.first()?;
        let target = self.arena.get_node_mut(node)?;
        target.entry.payload = source.payload;
        Some(self.reindex())
    }

    /// `node` and all of its descendants in pre-order.
    pub fn get_subtree_entries(&self, node: Index) -> Vec<Entry> {
        let Some(position) = self.position_of(node) else {
            return Vec::new();
        };
        subtree_span(&self.entries(), position).to_vec()
    }

    /// Current flat collection in pre-order.
    pub fn entries(&self) -> Vec<Entry> {
        self.arena
            .iter()
            .map(|(_, node)| node.entry.clone())
            .collect()
    }

    pub fn root(&self) -> Option<Index> {
        self.arena.root()
    }

    pub fn is_root(&self, node: Index) -> bool {
        self.arena.root() == Some(node)
    }

    pub fn node_at(&self, position: usize) -> Option<Index> {
        self.arena.iter().nth(position).map(|(idx, _)| idx)
    }

    pub fn position_of(&self, node: Index) -> Option<usize> {
        self.arena.iter().position(|(idx, _)| idx == node)
    }

    pub fn node_by_address(&self, address: Address) -> Option<Index> {
        self.node_at(address_to_index(address)?)
    }

    pub fn entry(&self, node: Index) -> Option<&Entry> {
        self.arena.get_node(node).map(|n| &n.entry)
    }

    pub fn parent_of(&self, node: Index) -> Option<Index> {
        self.arena.parent_of(node)
    }

    pub fn children_of(&self, node: Index) -> &[Index] {
        self.arena
            .get_node(node)
            .map_or(&[], |n| n.children.as_slice())
    }

    pub fn has_children(&self, node: Index) -> bool {
        self.arena.first_child(node).is_some()
    }

    /// Display name of `node`, e.g. `Entry 3`.
    pub fn label(&self, node: Index) -> String {
        match self.position_of(node) {
            Some(position) => format!("Entry {}", position),
            None => "Entry ?".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub(crate) fn arena(&self) -> &EntryArena {
        &self.arena
    }

    fn address_of(&self, node: Option<Index>) -> Address {
        node.and_then(|idx| self.arena.get_node(idx))
            .map_or(NO_ADDRESS, |n| n.entry.address)
    }
}

/// Entry at `index` and its descendants, scanned from a consistent table.
///
/// Walks forward from `index` while each entry's parent is already inside
/// the span; the first entry whose parent lies outside closes it.
pub fn subtree_span(entries: &[Entry], index: usize) -> &[Entry] {
    let Some(head) = entries.get(index) else {
        return &[];
    };
    let mut members = HashSet::from([head.address]);
    let mut end = index + 1;
    for entry in &entries[index + 1..] {
        if entry.parent == NO_ADDRESS || !members.contains(&entry.parent) {
            break;
        }
        members.insert(entry.address);
        end += 1;
    }
    &entries[index..end]
}
