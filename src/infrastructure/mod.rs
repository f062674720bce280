//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod clipboard;
pub mod di;
pub mod error;
pub mod notifier;
pub mod traits;

pub use clipboard::{FileClipboard, MemoryClipboard};
pub use error::{InfraError, InfraResult};
pub use notifier::RecordingNotifier;
pub use traits::{Clipboard, FileSystem, Notifier, RealFileSystem};
