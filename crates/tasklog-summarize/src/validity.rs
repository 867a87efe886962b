//! Sentence-validity services.
//!
//! The description parser asks whether each comma fragment is a complete
//! work item on its own ("fix login bug") or a dangling piece ("qa") that
//! belongs with its neighbour.

use std::future::Future;

use tasklog_config::{SummarizeConfig, ValidatorKind};
use tasklog_embeddings::{Embedder, LazyModel};

use crate::error::{SummarizeError, check_len};
use crate::prototype::{embed_centroids, nearest};

/// Flags each segment as a standalone sentence (`true`) or a fragment.
pub trait SentenceValidator: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the backing model cannot be loaded or run.
    fn validate(
        &self,
        segments: &[String],
    ) -> impl Future<Output = Result<Vec<bool>, SummarizeError>> + Send;
}

// ---------------------------------------------------------------------------
// Heuristic
// ---------------------------------------------------------------------------

/// A segment is valid when it has at least `min_words` words containing a letter.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicSentenceValidator {
    min_words: usize,
}

impl HeuristicSentenceValidator {
    #[must_use]
    pub const fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    #[must_use]
    pub fn is_sentence(&self, segment: &str) -> bool {
        let words = segment
            .split_whitespace()
            .filter(|w| w.chars().any(char::is_alphabetic))
            .count();
        words >= self.min_words.max(1)
    }
}

impl SentenceValidator for HeuristicSentenceValidator {
    async fn validate(&self, segments: &[String]) -> Result<Vec<bool>, SummarizeError> {
        Ok(segments.iter().map(|s| self.is_sentence(s)).collect())
    }
}

// ---------------------------------------------------------------------------
// Prototype
// ---------------------------------------------------------------------------

const SENTENCE_PROTOTYPES: &[&str] = &[
    "fix login bug",
    "review pull request for the payment service",
    "write unit tests for the parser",
    "deploy release to staging",
    "update api documentation",
    "investigate slow dashboard queries",
];

const FRAGMENT_PROTOTYPES: &[&str] = &["and", "etc", "also", "qa", "v2", "ok", "misc", "#123"];

/// Index 0 is the complete-task class.
const PROTOTYPE_CLASSES: &[&[&str]] = &[SENTENCE_PROTOTYPES, FRAGMENT_PROTOTYPES];

/// Labels a segment valid when its embedding sits closer to the complete-task
/// prototypes than to the fragment prototypes.
pub struct PrototypeSentenceValidator<E> {
    embedder: E,
    centroids: LazyModel<Vec<Vec<f32>>>,
}

impl<E: Embedder> PrototypeSentenceValidator<E> {
    #[must_use]
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            centroids: LazyModel::new(),
        }
    }
}

impl<E: Embedder> SentenceValidator for PrototypeSentenceValidator<E> {
    async fn validate(&self, segments: &[String]) -> Result<Vec<bool>, SummarizeError> {
        if segments.is_empty() {
            return Ok(Vec::new());
        }
        let centroids = self
            .centroids
            .get_or_load(|| embed_centroids(&self.embedder, PROTOTYPE_CLASSES))
            .await?;

        let vectors = self.embedder.embed(segments).await?;
        check_len("embedder", segments.len(), vectors.len())?;
        Ok(vectors.iter().map(|v| nearest(v, centroids) == 0).collect())
    }
}

// ---------------------------------------------------------------------------
// Configured
// ---------------------------------------------------------------------------

/// The validator selected by `summarize.validator`.
pub enum ConfiguredValidator<E> {
    Heuristic(HeuristicSentenceValidator),
    Prototype(PrototypeSentenceValidator<E>),
}

impl<E: Embedder> ConfiguredValidator<E> {
    #[must_use]
    pub fn from_config(config: &SummarizeConfig, embedder: E) -> Self {
        match config.validator {
            ValidatorKind::Heuristic => Self::Heuristic(HeuristicSentenceValidator::new(config.min_words)),
            ValidatorKind::Prototype => Self::Prototype(PrototypeSentenceValidator::new(embedder)),
        }
    }
}

impl<E: Embedder> SentenceValidator for ConfiguredValidator<E> {
    async fn validate(&self, segments: &[String]) -> Result<Vec<bool>, SummarizeError> {
        match self {
            Self::Heuristic(v) => v.validate(segments).await,
            Self::Prototype(v) => v.validate(segments).await,
        }
    }
}
