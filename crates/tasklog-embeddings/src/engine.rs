//! Synchronous fastembed engine.

use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use tasklog_config::{EmbeddingModelKind, ModelConfig};

use crate::error::EmbeddingError;

/// Local embedding engine backed by fastembed (ONNX runtime).
///
/// Model files are downloaded on first use into the configured cache
/// directory (`~/.tasklog/cache/fastembed/` unless overridden).
///
/// # Thread safety
///
/// [`TextEmbedding::embed`] requires `&mut self`. Callers on the async side go
/// through [`crate::EmbeddingService`], which owns the engine behind a mutex
/// and runs inference in `spawn_blocking`.
pub struct EmbeddingEngine {
    model: TextEmbedding,
    kind: EmbeddingModelKind,
}

impl EmbeddingEngine {
    /// Create an engine for the model selected in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] if model download or ONNX initialization fails.
    pub fn from_config(config: &ModelConfig) -> Result<Self, EmbeddingError> {
        let kind = config.embedding_model;
        tracing::debug!(model = ?kind, cache_dir = %config.resolved_cache_dir().display(), "loading embedding model");

        let model = TextEmbedding::try_new(
            TextInitOptions::new(fastembed_model(kind))
                .with_cache_dir(config.resolved_cache_dir())
                .with_show_download_progress(config.show_download_progress),
        )
        .map_err(|e| EmbeddingError::InitFailed(e.to_string()))?;

        Ok(Self { model, kind })
    }

    /// Embed a batch of texts. Returns one vector per input, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if the ONNX inference fails and
    /// [`EmbeddingError::CountMismatch`] if the model drops or adds vectors.
    pub fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = texts.len();
        let vectors = self
            .model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))?;
        if vectors.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmbedFailed`] if inference fails, or
    /// [`EmbeddingError::EmptyResult`] if the model returns no embeddings.
    pub fn embed_single(&mut self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut results = self
            .model
            .embed(vec![text.to_string()], None)
            .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))?;
        results.pop().ok_or(EmbeddingError::EmptyResult)
    }

    /// Output dimensionality of the loaded model.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        dimension_of(self.kind)
    }
}

const fn fastembed_model(kind: EmbeddingModelKind) -> EmbeddingModel {
    match kind {
        EmbeddingModelKind::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
        EmbeddingModelKind::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
    }
}

/// Both supported models produce 384-dimensional vectors.
#[must_use]
pub const fn dimension_of(kind: EmbeddingModelKind) -> usize {
    match kind {
        EmbeddingModelKind::AllMiniLmL6V2 | EmbeddingModelKind::BgeSmallEnV15 => 384,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::cosine_similarity;

    fn engine() -> EmbeddingEngine {
        EmbeddingEngine::from_config(&ModelConfig::default()).expect("engine should init")
    }

    #[test]
    fn dimension_constant() {
        assert_eq!(dimension_of(EmbeddingModelKind::AllMiniLmL6V2), 384);
        assert_eq!(dimension_of(EmbeddingModelKind::BgeSmallEnV15), 384);
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn batch_embed_correct_count() {
        let mut engine = engine();
        let texts = vec![
            "fix login bug".to_string(),
            "review pull request for auth service".to_string(),
            "sprint planning".to_string(),
        ];

        let embeddings = engine.embed_batch(texts).expect("batch embed should succeed");

        assert_eq!(embeddings.len(), 3);
        for (i, emb) in embeddings.iter().enumerate() {
            assert_eq!(emb.len(), engine.dimension(), "embedding {i} has wrong size");
        }
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn paraphrases_are_closer_than_unrelated_text() {
        let mut engine = engine();

        let fix = engine.embed_single("fixed the login bug").expect("embed A");
        let paraphrase = engine.embed_single("fix bug in login").expect("embed B");
        let unrelated = engine.embed_single("lunch with the team").expect("embed C");

        let sim_related = cosine_similarity(&fix, &paraphrase);
        let sim_unrelated = cosine_similarity(&fix, &unrelated);

        assert!(
            sim_related > sim_unrelated,
            "related ({sim_related:.4}) should beat unrelated ({sim_unrelated:.4})"
        );
    }

    #[test]
    #[ignore = "downloads the embedding model"]
    fn determinism() {
        let mut engine = engine();
        let emb1 = engine.embed_single("standup meeting").expect("first embed");
        let emb2 = engine.embed_single("standup meeting").expect("second embed");
        assert_eq!(emb1, emb2);
    }
}
