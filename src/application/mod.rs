//! Application layer: entry panel, document service and transfer payloads
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod events;
pub mod services;
pub mod transfer;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use events::Event;
pub use transfer::{TransferPayload, ENTRY_FORMAT};
