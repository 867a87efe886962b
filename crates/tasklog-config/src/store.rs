//! Task store location.

use serde::{Deserialize, Serialize};

fn default_tasks_path() -> String {
    String::from(".tasklog/tasks.jsonl")
}

fn default_settings_path() -> String {
    String::from(".tasklog/settings.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSONL file holding one tracked task per line.
    #[serde(default = "default_tasks_path")]
    pub tasks_path: String,

    /// JSON file holding user settings.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tasks_path: default_tasks_path(),
            settings_path: default_settings_path(),
        }
    }
}
