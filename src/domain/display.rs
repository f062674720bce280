//! Text rendering of entry trees.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::EntryArena;
use crate::domain::tree::EntryTree;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for EntryTree {
    /// Render the tree with `Entry {position}` labels, the way the editor
    /// names items.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        fn build_tree(arena: &EntryArena, node_idx: Index, position: &mut usize) -> Tree<String> {
            let mut tree = Tree::new(format!("Entry {}", position));
            *position += 1;
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    tree.push(build_tree(arena, child_idx, position));
                }
            }
            tree
        }

        let mut position = 0;
        build_tree(self.arena(), root_idx, &mut position)
    }
}
