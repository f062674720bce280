//! Application services

pub mod document;
pub mod panel;

pub use document::DocumentService;
pub use panel::{Actions, EntryPanel};
