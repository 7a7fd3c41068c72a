//! Cross-cutting error types for the RIB crates.
//!
//! Store-specific failures (`DatabaseError`) and configuration failures
//! (`ConfigError`) live in their own crates; the CLI folds all of them into
//! `anyhow` at the binary boundary.

use thiserror::Error;

/// Errors that can be raised by any RIB crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
