//! # tasklog-embeddings
//!
//! Local embedding generation for tasklog using fastembed (ONNX runtime).
//!
//! Produces 384-dimensional vectors for task titles and work items without
//! requiring any external API keys.
//!
//! ## Model
//!
//! Defaults to [`AllMiniLML6V2`](fastembed::EmbeddingModel::AllMiniLML6V2)
//! (sentence-transformers/all-MiniLM-L6-v2, mean pooling). Model files are
//! cached at `~/.tasklog/cache/fastembed/` unless `model.cache_dir` is set.
//!
//! ## Loading
//!
//! [`EmbeddingService`] loads its engine lazily on the first call that needs
//! it. Concurrent first calls share one load. A failed load is retried by the
//! next call.

pub mod engine;
pub mod error;
pub mod lazy;
pub mod service;
pub mod similarity;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::future::Future;
use std::sync::Arc;

pub use engine::EmbeddingEngine;
pub use error::EmbeddingError;
pub use lazy::{LazyModel, LoadState};
pub use service::EmbeddingService;
pub use similarity::{cosine_similarity, mean_vector};

/// Turns texts into vectors, one per input, in input order.
pub trait Embedder: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`EmbeddingError`] when the model cannot be loaded or
    /// inference fails.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send;

    /// Load the underlying model ahead of the first [`Self::embed`] call.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] when loading fails.
    fn load(&self) -> impl Future<Output = Result<(), EmbeddingError>> + Send {
        async { Ok(()) }
    }

    fn state(&self) -> LoadState {
        LoadState::Ready
    }
}

impl<E: Embedder> Embedder for &E {
    fn embed(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send {
        (**self).embed(texts)
    }

    fn load(&self) -> impl Future<Output = Result<(), EmbeddingError>> + Send {
        (**self).load()
    }

    fn state(&self) -> LoadState {
        (**self).state()
    }
}

impl<E: Embedder> Embedder for Arc<E> {
    fn embed(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbeddingError>> + Send {
        (**self).embed(texts)
    }

    fn load(&self) -> impl Future<Output = Result<(), EmbeddingError>> + Send {
        (**self).load()
    }

    fn state(&self) -> LoadState {
        (**self).state()
    }
}
