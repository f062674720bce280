//! Document snapshot service
//!
//! Loads and saves the flat entry collection of a document as a tagged JSON
//! snapshot. Binary BCM files are read and written by the format library;
//! this service only deals with the editor's own snapshot form.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{
    ApplicationError, ApplicationResult, IoResultExt, TransferPayload,
};
use crate::domain::Entry;
use crate::infrastructure::traits::FileSystem;

/// Service for persisting document entry collections.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the entry collection stored at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<Entry>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("document not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        let payload = TransferPayload::decode(&text)?;
        debug!("load: {} entries from {}", payload.entries.len(), path.display());
        Ok(payload.entries)
    }

    /// Write `entries` to `path`, creating parent directories.
    #[instrument(level = "debug", skip(self, entries), fields(count = entries.len()))]
    pub fn save(&self, path: &Path, entries: &[Entry]) -> ApplicationResult<()> {
        let text = TransferPayload::new(entries.to_vec()).encode()?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &text)
            .with_path_context("write document", path)
    }
}
