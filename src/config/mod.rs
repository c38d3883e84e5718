//! User settings
//!
//! Settings live in a small TOML file, by default
//! `~/.config/piper-gtk/settings.toml`. A missing file means defaults; the
//! file is only ever written by `piper-gtk config init`, atomically.
//!
//! ```toml
//! # Device to configure when several are plugged in (name or id)
//! device = "Logitech Gaming Mouse G500s"
//! # Expanding a resolution row collapses the others
//! single_expansion = false
//! # Use the built-in demo device instead of ratbagd
//! dry_run = false
//! ```
//!
//! # Example
//!
//! ```no_run
//! use piper_gtk::config::{Settings, DEFAULT_SETTINGS_PATH};
//!
//! let path = piper_gtk::config::expand_path(DEFAULT_SETTINGS_PATH)?;
//! let settings = Settings::load(&path)?;
//! println!("single expansion: {}", settings.single_expansion);
//! # Ok::<(), piper_gtk::config::ConfigError>(())
//! ```

mod error;

pub use error::ConfigError;

use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where settings are read from unless `--config` says otherwise
pub const DEFAULT_SETTINGS_PATH: &str = "~/.config/piper-gtk/settings.toml";

/// Persistent user preferences
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Preferred device (name or id) when several are connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Allow at most one expanded resolution row
    pub single_expansion: bool,
    /// Serve the demo device instead of connecting to ratbagd
    pub dry_run: bool,
}

impl Settings {
    /// Loads settings from `path`
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Parsed settings, or defaults if the file is absent
    /// * `Err(ConfigError::Parse)` - File exists but is malformed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parses settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Writes settings to `path` atomically, creating parent directories
    ///
    /// Refuses to replace an existing file unless `overwrite` is set.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<(), ConfigError> {
        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialise(e.to_string()))?;

        let mut file = AtomicWriteFile::options()
            .open(path)
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

        file.commit()
            .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

        Ok(())
    }
}

/// Expands `~` and environment variables in a settings path
pub fn expand_path(path: impl AsRef<str>) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::full(path.as_ref())
        .map_err(|e| ConfigError::InvalidPath(e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests;
