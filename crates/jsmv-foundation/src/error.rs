//! Error handling for jsmv

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type used throughout jsmv
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JsmvError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Resource already exists: {resource}")]
    AlreadyExists { resource: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal invariant was broken. Always a bug, never retried.
    #[error("Internal invariant violated: {message}")]
    Invariant { message: String },
}

impl JsmvError {
    /// Create a new not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create a new invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// Wrap an I/O error together with the path it happened on
    pub fn io_at(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            message: format!("{}: {}", path.display(), source),
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// True for errors raised by precondition checks before anything is touched
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::AlreadyExists { .. } | Self::InvalidRequest { .. }
        )
    }
}

impl From<std::io::Error> for JsmvError {
    fn from(err: std::io::Error) -> Self {
        JsmvError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// Result type alias for convenience
pub type JsmvResult<T> = Result<T, JsmvError>;
