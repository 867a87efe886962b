//! Shared, lazily loaded embedding service.

use std::sync::{Arc, Mutex};

use tasklog_config::ModelConfig;

use crate::Embedder;
use crate::engine::EmbeddingEngine;
use crate::error::EmbeddingError;
use crate::lazy::{LazyModel, LoadState};

type SharedEngine = Arc<Mutex<EmbeddingEngine>>;

/// Async front for [`EmbeddingEngine`].
///
/// The engine is loaded on first use, at most once per service. Batches are
/// split into chunks of `chunk_size` texts, each run in `spawn_blocking`, with
/// a yield to the runtime after every chunk.
pub struct EmbeddingService {
    config: ModelConfig,
    chunk_size: usize,
    engine: LazyModel<SharedEngine>,
}

impl EmbeddingService {
    #[must_use]
    pub fn new(config: ModelConfig, chunk_size: usize) -> Self {
        Self {
            config,
            chunk_size: chunk_size.max(1),
            engine: LazyModel::new(),
        }
    }

    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    async fn engine(&self) -> Result<SharedEngine, EmbeddingError> {
        let config = self.config.clone();
        self.engine
            .get_or_load(|| async move {
                let engine =
                    tokio::task::spawn_blocking(move || EmbeddingEngine::from_config(&config))
                        .await
                        .map_err(|e| {
                            EmbeddingError::TaskFailed(format!("spawn_blocking join: {e}"))
                        })??;
                tracing::info!(dimension = engine.dimension(), "embedding model ready");
                Ok(Arc::new(Mutex::new(engine)))
            })
            .await
            .map(Arc::clone)
    }
}

impl Embedder for EmbeddingService {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let engine = self.engine().await?;
        let mut vectors = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(self.chunk_size) {
            let engine = Arc::clone(&engine);
            let batch = chunk.to_vec();
            let embedded = tokio::task::spawn_blocking(move || {
                let mut engine = engine
                    .lock()
                    .map_err(|e| EmbeddingError::TaskFailed(format!("engine lock poisoned: {e}")))?;
                engine.embed_batch(batch)
            })
            .await
            .map_err(|e| EmbeddingError::TaskFailed(format!("spawn_blocking join: {e}")))??;

            vectors.extend(embedded);
            tokio::task::yield_now().await;
        }

        tracing::debug!(count = vectors.len(), "embedded texts");
        Ok(vectors)
    }

    async fn load(&self) -> Result<(), EmbeddingError> {
        self.engine().await.map(|_| ())
    }

    fn state(&self) -> LoadState {
        self.engine.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_service_is_unloaded() {
        let service = EmbeddingService::new(ModelConfig::default(), 0);
        assert_eq!(service.state(), LoadState::Uninitialized);
        assert_eq!(service.chunk_size(), 1);
    }

    #[tokio::test]
    async fn empty_batch_does_not_load_the_model() {
        let service = EmbeddingService::new(ModelConfig::default(), 32);
        let vectors = service.embed(&[]).await.expect("empty embed");
        assert!(vectors.is_empty());
        assert_eq!(service.state(), LoadState::Uninitialized);
    }

    #[tokio::test]
    #[ignore = "downloads the embedding model"]
    async fn chunked_embedding_preserves_order_and_count() {
        let service = EmbeddingService::new(ModelConfig::default(), 2);
        let texts: Vec<String> = ["fix login bug", "sprint planning", "code review", "deploy"]
            .iter()
            .map(ToString::to_string)
            .collect();

        let chunked = service.embed(&texts).await.expect("embed");
        assert_eq!(chunked.len(), 4);
        assert_eq!(service.state(), LoadState::Ready);

        let single = service.embed(&texts[2..3]).await.expect("embed one");
        assert_eq!(single[0], chunked[2]);
    }
}
