//! Progress stage configuration.
//!
//! Stages are an ordered list: "next stage" advancement follows list order.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named progress stage with the message and percentage reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StageConfig {
    pub name: String,
    pub message: String,
    pub percentage: u8,
}

impl StageConfig {
    fn new(name: &str, message: &str, percentage: u8) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            percentage,
        }
    }
}

fn default_stages() -> Vec<StageConfig> {
    vec![
        StageConfig::new("init", "initializing", 0),
        StageConfig::new(
            "loadingEmbeddingModel",
            "downloading embedding model (this may take a while)",
            40,
        ),
        StageConfig::new("preprocess", "preprocessing tasks", 50),
        StageConfig::new("filterWorkTasks", "filtering work tasks", 55),
        StageConfig::new("groupingTaskTitles", "grouping tasks by title", 60),
        StageConfig::new("parseTaskDescriptions", "parsing task descriptions", 65),
        StageConfig::new(
            "removeSimilarDescriptions",
            "removing similar task descriptions",
            85,
        ),
        StageConfig::new("finalizing", "format and sorting summary", 90),
        StageConfig::new("done", "summary complete", 100),
    ]
}

const fn default_debounce_ms() -> u64 {
    150
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgressConfig {
    #[serde(default = "default_stages")]
    pub stages: Vec<StageConfig>,

    /// Window in which successive CLI progress updates are coalesced.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ProgressConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.percentage > 100 {
                return Err(ConfigError::invalid(
                    "progress.stages",
                    format!("stage '{}' has percentage {} > 100", stage.name, stage.percentage),
                ));
            }
            if self.stages[..i].iter().any(|s| s.name == stage.name) {
                return Err(ConfigError::invalid(
                    "progress.stages",
                    format!("duplicate stage name '{}'", stage.name),
                ));
            }
        }
        Ok(())
    }
}
