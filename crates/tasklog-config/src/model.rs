//! Embedding model configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Supported local embedding models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingModelKind {
    /// sentence-transformers/all-MiniLM-L6-v2, 384 dims, mean pooling.
    #[default]
    AllMiniLmL6V2,
    /// BAAI/bge-small-en-v1.5, 384 dims.
    BgeSmallEnV15,
}

const fn default_show_download_progress() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub embedding_model: EmbeddingModelKind,

    /// Model cache directory. Empty means `~/.tasklog/cache/fastembed`.
    #[serde(default)]
    pub cache_dir: String,

    #[serde(default = "default_show_download_progress")]
    pub show_download_progress: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            embedding_model: EmbeddingModelKind::default(),
            cache_dir: String::new(),
            show_download_progress: default_show_download_progress(),
        }
    }
}

impl ModelConfig {
    /// Resolve the model cache directory.
    #[must_use]
    pub fn resolved_cache_dir(&self) -> PathBuf {
        if !self.cache_dir.is_empty() {
            return PathBuf::from(&self.cache_dir);
        }
        dirs::home_dir().map_or_else(
            || PathBuf::from(".fastembed_cache"),
            |h| h.join(".tasklog").join("cache").join("fastembed"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_cache_dir_wins() {
        let config = ModelConfig {
            cache_dir: "/tmp/models".into(),
            ..Default::default()
        };
        assert_eq!(config.resolved_cache_dir(), PathBuf::from("/tmp/models"));
    }

    #[test]
    fn default_cache_dir_is_under_tasklog() {
        let dir = ModelConfig::default().resolved_cache_dir();
        assert!(dir.ends_with("fastembed"));
    }
}
