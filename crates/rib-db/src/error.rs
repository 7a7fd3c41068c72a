//! Remote store error types for rib-db.

use thiserror::Error;

/// PostgREST code for a single-object read that did not match exactly one
/// row. Only the zero-row form means "not found".
pub const NOT_FOUND_CODE: &str = "PGRST116";

const ZERO_ROWS_DETAIL: &str = "contains 0 rows";

/// Errors from remote store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A query could not be built or executed.
    #[error("Query failed: {0}")]
    Query(String),

    /// The REST API answered with a non-success status.
    #[error("API error {status} ({}): {message}", code.as_deref().unwrap_or("no code"))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A row could not be decoded into the expected shape.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// No row matched a lookup that distinguishes absence from failure.
    #[error("Not found: {table} {key}")]
    NotFound { table: String, key: String },

    /// Invalid state encountered (e.g., a kind without an owner join).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether this error means "no matching row" rather than a failed query.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { code, message, .. } => {
                code.as_deref() == Some(NOT_FOUND_CODE) && message.contains(ZERO_ROWS_DETAIL)
            }
            _ => false,
        }
    }
}
