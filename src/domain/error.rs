//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::address::Address;

/// Domain errors describe entry collections that cannot form a tree.
///
/// Editing operations never fail with these; they only come out of building
/// a tree from a flat collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("entry collection is empty")]
    EmptyCollection,

    #[error("first entry {address:#x} must be the root but has parent {parent:#x}")]
    RootHasParent { address: Address, parent: Address },

    #[error("entry {0:#x} has no parent but the root is already set")]
    MultipleRoots(Address),

    #[error("entry {address:#x} references parent {parent:#x} which does not precede it")]
    DanglingParent { address: Address, parent: Address },

    #[error("address {0:#x} is used by more than one entry")]
    DuplicateAddress(Address),
}

/// Result type for tree construction.
pub type DomainResult<T> = Result<T, DomainError>;
