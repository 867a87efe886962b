//! User settings record and its JSON file store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use tasklog_core::TrackedTask;

use crate::error::StoreError;
use crate::watch::{WatchHandle, Watchers};

/// Defaults applied to tasks created through `tasklog add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskTemplate {
    pub title: String,
    pub description: String,
}

impl Default for TaskTemplate {
    fn default() -> Self {
        Self {
            title: "No title".to_string(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// When the working day usually starts. Used as the start of the first
    /// task of the day.
    pub start_time: DateTime<Utc>,
    pub auto_focus_description: bool,
    #[serde(rename = "taskCreateDefaultValue")]
    pub task_create_default: TaskTemplate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_time: today_at_eight(),
            auto_focus_description: false,
            task_create_default: TaskTemplate::default(),
        }
    }
}

impl Settings {
    /// Build a new pending task, filling blank fields from the template.
    #[must_use]
    pub fn new_task(
        &self,
        id: impl Into<String>,
        title: Option<&str>,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> TrackedTask {
        let pick = |given: Option<&str>, fallback: &str| {
            given
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        TrackedTask::new(
            id,
            pick(title, &self.task_create_default.title),
            pick(description, &self.task_create_default.description),
            now,
        )
    }
}

/// 08:00 local time today, expressed in UTC.
fn today_at_eight() -> DateTime<Utc> {
    Local::now()
        .date_naive()
        .and_hms_opt(8, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map_or_else(Utc::now, |local| local.with_timezone(&Utc))
}

/// Settings persisted as a single JSON document.
pub struct SettingsStore {
    path: PathBuf,
    watchers: Watchers<Settings>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            watchers: Watchers::default(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored settings, or the defaults when nothing has been saved yet.
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] on a unreadable file.
    pub fn get_settings(&self) -> Result<Settings, StoreError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be written.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        self.watchers.notify(settings);
        Ok(())
    }

    /// Load, modify, and save in one step.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_settings`] and [`Self::save_settings`].
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<Settings, StoreError> {
        let mut settings = self.get_settings()?;
        change(&mut settings);
        self.save_settings(&settings)?;
        Ok(settings)
    }

    pub fn watch(&self, callback: impl Fn(&Settings) + Send + Sync + 'static) -> WatchHandle {
        self.watchers.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_new_installs() {
        let settings = Settings::default();
        assert!(!settings.auto_focus_description);
        assert_eq!(settings.task_create_default.title, "No title");
        assert_eq!(settings.task_create_default.description, "");
        assert_eq!(settings.start_time.with_timezone(&Local).hour(), 8);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"autoFocusDescription": true}"#).expect("parse");
        assert!(settings.auto_focus_description);
        assert_eq!(settings.task_create_default, TaskTemplate::default());
    }

    #[test]
    fn stored_field_names_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).expect("serialize");
        assert!(json.get("startTime").is_some());
        assert!(json.get("taskCreateDefaultValue").is_some());
    }

    #[test]
    fn new_task_uses_template_for_blank_fields() {
        let settings = Settings::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();

        let task = settings.new_task("t1", Some("  "), Some("fix login bug"), now);
        assert_eq!(task.title, "No title");
        assert_eq!(task.description, "fix login bug");
        assert_eq!(task.created_at, now);
    }
}
