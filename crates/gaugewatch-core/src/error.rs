//! Error types for gaugewatch

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias using gaugewatch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for gaugewatch operations
#[derive(Error, Debug)]
pub enum Error {
    /// The measurement configuration could not be loaded
    #[error(transparent)]
    ConfigLoad(#[from] ConfigLoadError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The shutdown signal could not be awaited
    #[error("shutdown signal failed: {0}")]
    ShutdownSignal(#[source] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Startup failure while loading the measurement configuration.
///
/// Every variant is fatal: the server never binds with a partial configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// The file does not exist
    #[error("configuration file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The file exists but may not be read
    #[error("permission denied reading configuration file: {}", path.display())]
    PermissionDenied {
        /// Path that was refused
        path: PathBuf,
    },

    /// Any other read failure
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: std::io::Error,
    },

    /// The extension names a format we cannot parse
    #[error("unsupported configuration format: {}", path.display())]
    UnsupportedFormat {
        /// Path with the unknown extension
        path: PathBuf,
    },

    /// Malformed document, missing field or wrong value type
    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        /// Path of the rejected document
        path: PathBuf,
        /// Syntax or schema failure
        #[source]
        source: ::config::ConfigError,
    },
}

impl ConfigLoadError {
    /// Classify an IO failure on `path`
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Per-request rejection. Always answered with `400 Bad Request`.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The body is not a JSON object
    #[error("request body is not a JSON object: {0}")]
    RequestParse(#[from] serde_json::Error),

    /// A configured measurement carries a non-numeric value
    #[error("measurement '{name}' must be a number, got {found}")]
    Evaluation {
        /// Configured measurement name
        name: String,
        /// JSON kind found instead of a number
        found: &'static str,
    },
}

impl RequestError {
    /// Create an evaluation error for a non-numeric field
    pub fn evaluation(name: impl Into<String>, found: &'static str) -> Self {
        Self::Evaluation {
            name: name.into(),
            found,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
