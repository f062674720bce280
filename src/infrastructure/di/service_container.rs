//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DocumentService, EntryPanel};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::Entry;
use crate::infrastructure::clipboard::FileClipboard;
use crate::infrastructure::traits::{Clipboard, FileSystem, Notifier, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Transfer medium for copy/paste
    pub clipboard: Arc<dyn Clipboard>,

    /// Notification bus the panel publishes to
    pub notifier: Arc<dyn Notifier>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// The clipboard is a file at `settings.clipboard_path`.
    pub fn new(settings: Settings, notifier: Arc<dyn Notifier>) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let clipboard = Arc::new(FileClipboard::new(
            settings.clipboard_path.clone(),
            fs.clone(),
        ));
        Self::with_deps(settings, fs, clipboard, notifier)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            clipboard,
            notifier,
        }
    }

    pub fn document_service(&self) -> DocumentService {
        DocumentService::new(self.fs.clone())
    }

    /// Open an entry panel over `entries`.
    pub fn entry_panel(&self, entries: Vec<Entry>) -> ApplicationResult<EntryPanel> {
        EntryPanel::new(entries, self.clipboard.clone(), self.notifier.clone())
    }
}
