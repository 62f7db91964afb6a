//! Error types for core module
//!
//! Covers settings persistence. Failures here are never fatal to a running
//! game; callers log them and fall back to defaults.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// No settings file at the given path
    #[error("No settings file at {}", path.display())]
    SettingsMissing { path: PathBuf },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
