//! Error types for fortune fetching.
//!
//! These never reach callers of [`FortuneProvider::get_fortune`]; they are
//! logged and replaced by a fallback fortune.
//!
//! [`FortuneProvider::get_fortune`]: crate::FortuneProvider::get_fortune

use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while fetching or interpreting a fortune.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request did not complete (connect failure, timeout, broken body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// A body that should have been JSON was not.
    #[error("malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The fortune document parsed but was not a JSON object.
    #[error("fortune reply is not a JSON object")]
    NotAnObject,
}
