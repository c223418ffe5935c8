//! Unified error type for mediagen.

use thiserror::Error;

/// Errors that can occur while serving a generation request.
#[derive(Debug, Error)]
pub enum GenError {
    /// Malformed or out-of-range request fields. The backend is never
    /// invoked for a request that fails validation.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The image or video backend failed, including backend call timeouts.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A network error occurred while talking to a remote backend.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure assembling or encoding final media.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl GenError {
    /// Whether this error was raised before any backend dispatch.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
