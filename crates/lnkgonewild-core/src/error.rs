//! Error types for lnkgonewild.
//!
//! Every stage of shortcut creation reports failures through [`LnkError`].
//! Stages never retry; the first failure is handed back to the caller as-is.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for shortcut creation.
#[derive(Debug, Error)]
pub enum LnkError {
    /// Input rejected before any side effect happened.
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    /// The scripting host process could not be started.
    #[error("Failed to launch script host {program}: {message}")]
    LaunchFailed { program: String, message: String },

    /// The scripting host did not exit within the wait bound.
    #[error("Script host timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },
}

/// Result type alias for lnkgonewild operations.
pub type Result<T> = std::result::Result<T, LnkError>;

impl From<std::io::Error> for LnkError {
    fn from(err: std::io::Error) -> Self {
        LnkError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl LnkError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        LnkError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error for a named input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        LnkError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert to a process exit code.
    ///
    /// - 2: Validation error
    /// - 3: Script host launch failure
    /// - 4: Script host timeout
    /// - 5: Filesystem error
    pub fn exit_code(&self) -> i32 {
        match self {
            LnkError::Validation { .. } => 2,
            LnkError::LaunchFailed { .. } => 3,
            LnkError::Timeout(_) => 4,
            LnkError::Io { .. } => 5,
        }
    }
}
