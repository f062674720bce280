use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entry::Entry;

/// Tree node in the arena-based entry hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    /// Entry record carried by this node
    pub entry: Entry,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, left to right
    pub children: Vec<Index>,
}

/// Arena-based ordered tree of entries.
///
/// Parents own the ordered child list; children only keep the parent index
/// for upward traversal. Generational indices stay valid across unrelated
/// insertions and removals, so callers can hold on to a node handle while the
/// tree is edited around it.
#[derive(Debug, Default)]
pub struct EntryArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl EntryArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Replace the whole tree with a single root node.
    #[instrument(level = "trace", skip(self, entry))]
    pub fn insert_root(&mut self, entry: Entry) -> Index {
        self.arena.clear();
        let idx = self.arena.insert(TreeNode {
            entry,
            parent: None,
            children: Vec::new(),
        });
        self.root = Some(idx);
        idx
    }

    /// Insert `entry` as child number `slot` of `parent`.
    ///
    /// Slots past the end append. Returns `None` if `parent` is gone.
    #[instrument(level = "trace", skip(self, entry))]
    pub fn insert_child(&mut self, entry: Entry, parent: Index, slot: usize) -> Option<Index> {
        if !self.arena.contains(parent) {
            return None;
        }
        let idx = self.arena.insert(TreeNode {
            entry,
            parent: Some(parent),
            children: Vec::new(),
        });
        let parent_node = self.arena.get_mut(parent)?;
        let slot = slot.min(parent_node.children.len());
        parent_node.children.insert(slot, idx);
        Some(idx)
    }

    #[instrument(level = "trace", skip(self, entry))]
    pub fn append_child(&mut self, entry: Entry, parent: Index) -> Option<Index> {
        self.insert_child(entry, parent, usize::MAX)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn parent_of(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    pub fn first_child(&self, idx: Index) -> Option<Index> {
        self.get_node(idx)
            .and_then(|node| node.children.first().copied())
    }

    /// Position of `idx` within its parent's child list.
    pub fn slot_of(&self, idx: Index) -> Option<usize> {
        let parent = self.parent_of(idx)?;
        self.get_node(parent)?
            .children
            .iter()
            .position(|&child| child == idx)
    }

    pub fn next_sibling(&self, idx: Index) -> Option<Index> {
        let parent = self.parent_of(idx)?;
        let slot = self.slot_of(idx)?;
        self.get_node(parent)?.children.get(slot + 1).copied()
    }

    /// Pre-order traversal of the whole tree.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree rooted at `idx`.
    pub fn iter_subtree(&self, idx: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(idx))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Remove `idx` and all of its descendants. Returns the number removed.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) -> usize {
        let doomed: Vec<Index> = self.iter_subtree(idx).map(|(i, _)| i).collect();
        self.detach(idx);
        for &i in &doomed {
            self.arena.remove(i);
        }
        if self.root == Some(idx) {
            self.root = None;
        }
        doomed.len()
    }

    /// Remove `idx` and promote its children into its slot, keeping their order.
    ///
    /// The root cannot be spliced out since its children would have no parent.
    #[instrument(level = "debug", skip(self))]
    pub fn splice_out(&mut self, idx: Index) -> Option<Entry> {
        let parent = self.parent_of(idx)?;
        let slot = self.slot_of(idx)?;
        let node = self.arena.remove(idx)?;

        for &child in &node.children {
            if let Some(child_node) = self.arena.get_mut(child) {
                child_node.parent = Some(parent);
            }
        }
        let parent_node = self.arena.get_mut(parent)?;
        parent_node
            .children
            .splice(slot..=slot, node.children.iter().copied());
        Some(node.entry)
    }

    fn detach(&mut self, idx: Index) {
        if let Some(parent) = self.parent_of(idx) {
            if let Some(parent_node) = self.arena.get_mut(parent) {
                parent_node.children.retain(|&child| child != idx);
            }
        }
    }
}

pub struct TreeIterator<'a> {
    arena: &'a EntryArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a EntryArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
