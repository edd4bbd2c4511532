//! Error types for log retrieval.

use thiserror::Error;

/// Result type alias for log retrieval operations.
pub type Result<T> = std::result::Result<T, LogsError>;

/// Errors that can occur while retrieving logs from the search engine.
#[derive(Debug, Error)]
pub enum LogsError {
    /// Connection or fetcher configuration is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// A multi-field matcher was supplied with no field/value pairs.
    #[error("no matcher fields supplied")]
    EmptyMatcher,

    /// The HTTP request to the search engine failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The search engine answered with a non-success status.
    #[error("search engine returned {status}: {reason}")]
    Engine {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, as far as it could be read.
        reason: String,
    },

    /// Reading the CA certificate bundle failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogsError {
    /// Creates a `Config` error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an `Engine` error from a response status and body.
    #[must_use]
    pub fn engine(status: u16, reason: impl Into<String>) -> Self {
        Self::Engine {
            status,
            reason: reason.into(),
        }
    }
}
