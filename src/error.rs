//! Error types
//!
//! Only session construction, progress storage and settings files can fail. `tick` and `tap`
//! are total over a validly constructed session.

use thiserror::Error;

/// Result type alias for session construction
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised while building a session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Config values outside the playable range
    #[error("invalid session config: {0}")]
    InvalidConfig(String),
}

/// Errors raised by progress storage backends
#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("progress storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("progress file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while writing the settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}
