use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or writing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings path could not be expanded (e.g. unset `$HOME`).
    #[error("Invalid settings path: {0}")]
    InvalidPath(String),
    /// Settings file exists but is not valid TOML for our schema.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    /// Refused to overwrite an existing settings file.
    #[error("Settings file already exists: {0}")]
    AlreadyExists(PathBuf),
    /// Serialising settings failed.
    #[error("Failed to serialise settings: {0}")]
    Serialise(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
