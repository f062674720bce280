//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bcmtree/bcmtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `BCMTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_path;

/// Unified configuration for bcmtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File backing the clipboard between invocations
    pub clipboard_path: PathBuf,
    /// Delete children together with an entry unless told otherwise
    pub delete_children: bool,
    /// Copy children together with an entry unless told otherwise
    pub copy_children: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clipboard_path: default_clipboard_path(),
            delete_children: false,
            copy_children: true,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub clipboard_path: Option<PathBuf>,
    pub delete_children: Option<bool>,
    pub copy_children: Option<bool>,
}

fn default_clipboard_path() -> PathBuf {
    ProjectDirs::from("", "", "bcmtree")
        .map(|dirs| dirs.cache_dir().join("clipboard.json"))
        .unwrap_or_else(|| PathBuf::from("~/.bcmtree/clipboard.json"))
}

/// Get the XDG config directory for bcmtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bcmtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bcmtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.clipboard_path = expand_path(&self.clipboard_path);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            clipboard_path: overlay
                .clipboard_path
                .clone()
                .unwrap_or_else(|| self.clipboard_path.clone()),
            delete_children: overlay.delete_children.unwrap_or(self.delete_children),
            copy_children: overlay.copy_children.unwrap_or(self.copy_children),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply BCMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BCMTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("clipboard_path") {
            settings.clipboard_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("delete_children") {
            settings.delete_children = val;
        }
        if let Ok(val) = config.get_bool("copy_children") {
            settings.copy_children = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bcmtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/bcmtree/bcmtree.toml
#   Explicit: bcmtree --config <file>
#   Env:      BCMTREE_* environment variables (explicit overrides)

# File shared by copy/paste between invocations
# clipboard_path = "~/.cache/bcmtree/clipboard.json"

# Delete an entry's children along with it (override with --cascade / --keep-children)
# delete_children = false

# Copy an entry's children along with it (override with --no-children)
# copy_children = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
