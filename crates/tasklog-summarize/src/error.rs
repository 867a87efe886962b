//! Summarization error types.

use tasklog_embeddings::EmbeddingError;

/// Failures of the model-backed summarization path.
///
/// None of these reach [`crate::Summarizer::summarize`] callers: any of them
/// switches the run over to the title-only fallback.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    /// A service answered with the wrong number of results.
    #[error("{service} returned {actual} results for {expected} inputs")]
    LengthMismatch {
        service: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A classifier produced something outside the fixed category set.
    #[error("Classifier failed: {0}")]
    Classifier(String),

    /// A configured abbreviation could not be turned into a pattern.
    #[error("Invalid abbreviation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Check that a batch service kept one result per input.
pub(crate) fn check_len(
    service: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), SummarizeError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SummarizeError::LengthMismatch {
            service,
            expected,
            actual,
        })
    }
}
