//! Store error types for tasklog-store.

use thiserror::Error;

use tasklog_core::CoreError;

/// Errors from task and settings persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No task with the given id exists.
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// A task with the given id already exists.
    #[error("Duplicate task id: {id}")]
    Duplicate { id: String },

    /// A record violated a model invariant.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
