//! Embedding error types.

/// Errors that can occur while loading a model or generating embeddings.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmbeddingError {
    /// Model initialization failed (download, ONNX runtime, cache issues).
    #[error("Model initialization failed: {0}")]
    InitFailed(String),

    /// Embedding generation failed (inference error, invalid input).
    #[error("Embedding generation failed: {0}")]
    EmbedFailed(String),

    /// Model returned zero embeddings for a non-empty input.
    #[error("Empty result from embedding model")]
    EmptyResult,

    /// Model returned a different number of vectors than texts given.
    #[error("Expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    /// Blocking inference task panicked or the engine lock was poisoned.
    #[error("Embedding task failed: {0}")]
    TaskFailed(String),
}
