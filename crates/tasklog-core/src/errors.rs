//! Cross-cutting error types for tasklog.
//!
//! Domain-specific errors (e.g., `EmbeddingError`, `StoreError`) are defined in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any tasklog crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Task lookup returned no result.
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// A task or value failed validation (time ordering, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A title category index outside the fixed category set.
    #[error("Unknown title category index: {0}")]
    UnknownCategory(usize),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
