//! Summarization pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How task titles are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// Numeric-variant split, then greedy embedding-similarity clustering.
    #[default]
    Similarity,
    /// Title classifier mapping each title to a fixed category.
    Classifier,
}

/// Which sentence-validity service decides whether comma fragments stand alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    /// Word-count heuristic, no model required.
    #[default]
    Heuristic,
    /// Nearest-prototype over sentence embeddings.
    Prototype,
}

const fn default_similarity_threshold() -> f32 {
    0.7
}

const fn default_title_threshold() -> f32 {
    0.9
}

const fn default_min_item_chars() -> usize {
    4
}

const fn default_embed_chunk_size() -> usize {
    32
}

const fn default_min_words() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizeConfig {
    /// Cosine similarity above which two work items are duplicates.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Cosine similarity above which two titles share a group.
    #[serde(default = "default_title_threshold")]
    pub title_threshold: f32,

    #[serde(default)]
    pub strategy: GroupingStrategy,

    #[serde(default)]
    pub validator: ValidatorKind,

    /// Minimum word count for the heuristic validator to accept a fragment.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Work items shorter than this (in chars, trimmed) are dropped before
    /// semantic deduplication.
    #[serde(default = "default_min_item_chars")]
    pub min_item_chars: usize,

    /// Maximum texts per embedding call; the pipeline yields between chunks.
    #[serde(default = "default_embed_chunk_size")]
    pub embed_chunk_size: usize,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            title_threshold: default_title_threshold(),
            strategy: GroupingStrategy::default(),
            validator: ValidatorKind::default(),
            min_words: default_min_words(),
            min_item_chars: default_min_item_chars(),
            embed_chunk_size: default_embed_chunk_size(),
        }
    }
}

impl SummarizeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("summarize.similarity_threshold", self.similarity_threshold)?;
        check_threshold("summarize.title_threshold", self.title_threshold)?;
        if self.embed_chunk_size == 0 {
            return Err(ConfigError::invalid(
                "summarize.embed_chunk_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Cosine similarity thresholds only make sense inside `[-1, 1]`.
pub(crate) fn check_threshold(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} is outside [-1, 1]"),
        ))
    }
}
