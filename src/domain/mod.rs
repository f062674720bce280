//! Domain layer: entries, address codec and the entry tree synchronizer
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod address;
pub mod arena;
pub mod display;
pub mod entry;
pub mod error;
pub mod tree;

pub use address::{address_to_index, index_to_address, Address, NO_ADDRESS};
pub use arena::{EntryArena, TreeNode};
pub use display::TreeDisplay;
pub use entry::{Entry, EntryPayload};
pub use error::{DomainError, DomainResult};
pub use tree::{subtree_span, EntryTree, InsertPosition, Insertion, Removal};

/// Node handle inside an [`EntryTree`].
pub use generational_arena::Index as NodeId;
