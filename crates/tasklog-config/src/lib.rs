//! # tasklog-config
//!
//! Layered configuration loading for tasklog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASKLOG_*` prefix, `__` as separator)
//! 2. Project-level `.tasklog/config.toml`
//! 3. User-level `~/.config/tasklog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TASKLOG_SUMMARIZE__SIMILARITY_THRESHOLD` -> `summarize.similarity_threshold`,
//! `TASKLOG_MODEL__CACHE_DIR` -> `model.cache_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tasklog_config::TasklogConfig;
//!
//! let config = TasklogConfig::load_with_dotenv().expect("config");
//! println!("dedup threshold: {}", config.summarize.similarity_threshold);
//! ```

mod error;
mod filter;
mod model;
mod normalize;
mod progress;
mod store;
mod summarize;

pub use error::ConfigError;
pub use filter::FilterConfig;
pub use model::{EmbeddingModelKind, ModelConfig};
pub use normalize::NormalizeConfig;
pub use progress::{ProgressConfig, StageConfig};
pub use store::StoreConfig;
pub use summarize::{GroupingStrategy, SummarizeConfig, ValidatorKind};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TasklogConfig {
    #[serde(default)]
    pub summarize: SummarizeConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl TasklogConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] on malformed sources and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load from an explicit TOML file on top of defaults, still honoring env vars.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.into()))
            .merge(Env::prefixed("TASKLOG_").split("__"));
        Self::from_figment(&figment)
    }

    /// Extract and validate from a prepared figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".tasklog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TASKLOG_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.summarize.validate()?;
        self.progress.validate()?;
        if self.normalize.fallback_title.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "normalize.fallback_title".into(),
                reason: "must not be blank".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tasklog").join("config.toml"))
    }

    /// Load `.env` from the workspace root, walking up from
    /// `CARGO_MANIFEST_DIR` when set, else from the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
