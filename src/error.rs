//! Domain-specific error types for archive-stats

use thiserror::Error;

/// Failure classification for a reporting run. Every variant is fatal:
/// the first error aborts the run and no further queries are issued.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Malformed response: {message}")]
    Response { message: String },

    #[error("Row schema error: {message}")]
    Schema { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        StatsError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::Response {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for StatsError {
    fn from(err: std::io::Error) -> Self {
        StatsError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias for archive-stats operations
pub type Result<T> = std::result::Result<T, StatsError>;
