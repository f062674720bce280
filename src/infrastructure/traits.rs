//! I/O boundary traits for testability
//!
//! These traits abstract the collaborators of the entry panel (filesystem,
//! clipboard, notification bus), allowing services to be tested with
//! in-memory implementations.

use std::io;
use std::path::Path;

use crate::application::Event;
use crate::domain::Entry;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Transfer medium for copied entries.
///
/// Holds at most one payload. Reading something that is not an entry
/// payload yields `Ok(None)`, the same as an empty clipboard.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard content with `entries`, order preserved.
    fn write_entries(&self, entries: &[Entry]) -> io::Result<()>;

    /// Entries on the clipboard, if it holds a compatible payload.
    fn read_entries(&self) -> io::Result<Option<Vec<Entry>>>;

    /// Forget the current content.
    fn clear(&self) -> io::Result<()>;

    /// Whether a paste would find compatible data.
    fn has_entries(&self) -> bool {
        matches!(self.read_entries(), Ok(Some(_)))
    }
}

/// One-way notification bus.
///
/// Publishing is fire-and-forget: there is no acknowledgment, and what a
/// subscriber does with the event is not the publisher's concern.
pub trait Notifier: Send + Sync {
    fn publish(&self, event: Event);
}

impl<F> Notifier for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn publish(&self, event: Event) {
        self(&event)
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
