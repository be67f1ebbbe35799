//! Error types for remote content store calls
//!
//! These never cross the store facade: every public journal operation
//! degrades to an empty or `None` value instead of returning an error.

use thiserror::Error;

/// Content store client errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Database or page not found in the content store
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API key rejected or integration lacks access to the database
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Content store API returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse API response JSON
    #[error("Parse error: {0}")]
    Parse(String),
}
