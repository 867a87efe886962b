use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;
use crate::errors::CoreError;

/// A time-tracked unit of work as stored by the task store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl TrackedTask {
    /// Create a pending task with no time range.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Pending,
            created_at,
            start: None,
            end: None,
        }
    }

    /// Check the record invariants: non-empty id and `start <= end`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("task id must not be empty".into()));
        }
        if let (Some(start), Some(end)) = (self.start, self.end)
            && start > end
        {
            return Err(CoreError::Validation(format!(
                "task {} starts after it ends ({start} > {end})",
                self.id
            )));
        }
        Ok(())
    }
}

/// Normalized `{title, description}` pair derived 1:1 from a [`TrackedTask`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedTask {
    pub title: String,
    pub description: String,
}

impl ParsedTask {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
