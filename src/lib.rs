//! bcmtree: entry tree editing for BCM collision-mesh tables.
//!
//! A BCM table is a flat list of entries linked by file-offset addresses
//! (parent, first child, next sibling, top-level ancestor). Editing happens
//! on an ordered tree; after every structural change a reindex pass derives
//! the flat, address-linked table again.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
