//! Clipboard implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::application::TransferPayload;
use crate::domain::Entry;
use crate::infrastructure::traits::{Clipboard, FileSystem};

fn encode(entries: &[Entry]) -> io::Result<String> {
    TransferPayload::new(entries.to_vec())
        .encode()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

/// Clipboard persisted as a tagged JSON file.
///
/// Lets separate command invocations share copied entries.
pub struct FileClipboard {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    #[instrument(level = "debug", skip(self, entries), fields(path = %self.path.display(), count = entries.len()))]
    fn write_entries(&self, entries: &[Entry]) -> io::Result<()> {
        let text = encode(entries)?;
        self.fs.ensure_parent(&self.path)?;
        self.fs.write(&self.path, &text)
    }

    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn read_entries(&self) -> io::Result<Option<Vec<Entry>>> {
        if !self.fs.is_file(&self.path) {
            debug!("clipboard file absent");
            return Ok(None);
        }
        let text = self.fs.read_to_string(&self.path)?;
        Ok(TransferPayload::decode_compatible(&text))
    }

    fn clear(&self) -> io::Result<()> {
        if self.fs.exists(&self.path) {
            self.fs.remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Process-local clipboard holding the serialized payload.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put arbitrary text on the clipboard, as another application would.
    pub fn set_text(&self, text: impl Into<String>) {
        if let Ok(mut content) = self.content.lock() {
            *content = Some(text.into());
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_entries(&self, entries: &[Entry]) -> io::Result<()> {
        let text = encode(entries)?;
        self.set_text(text);
        Ok(())
    }

    fn read_entries(&self) -> io::Result<Option<Vec<Entry>>> {
        let content = self
            .content
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        Ok(content
            .as_deref()
            .and_then(TransferPayload::decode_compatible))
    }

    fn clear(&self) -> io::Result<()> {
        let mut content = self
            .content
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        *content = None;
        Ok(())
    }
}
