//! Deterministic embedder for tests that exercise similarity logic without a
//! model download. Enabled for dependents through the `test-support` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::{Embedder, EmbeddingError};

const DIMENSION: usize = 512;

/// Bag-of-words embedder: one dimension per distinct lowercase token,
/// assigned in first-seen order.
#[derive(Default)]
pub struct BagOfWords {
    vocabulary: Mutex<HashMap<String, usize>>,
    calls: AtomicUsize,
}

impl BagOfWords {
    /// Number of `embed` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut vocabulary = self
            .vocabulary
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut vector = vec![0.0; DIMENSION];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let next = vocabulary.len();
            let slot = *vocabulary.entry(token.to_string()).or_insert(next);
            vector[slot % DIMENSION] += 1.0;
        }
        vector
    }
}

impl Embedder for BagOfWords {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }
}
