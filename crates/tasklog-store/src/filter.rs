//! Task selection for [`crate::TaskStore::get_tasks`].

use chrono::{DateTime, Utc};

use tasklog_core::{TaskStatus, TrackedTask};

/// Selects tasks by creation time and status. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    #[must_use]
    pub fn created_after(mut self, at: DateTime<Utc>) -> Self {
        self.created_after = Some(at);
        self
    }

    #[must_use]
    pub fn created_before(mut self, at: DateTime<Utc>) -> Self {
        self.created_before = Some(at);
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn matches(&self, task: &TrackedTask) -> bool {
        if let Some(after) = self.created_after
            && task.created_at < after
        {
            return false;
        }
        if let Some(before) = self.created_before
            && task.created_at >= before
        {
            return false;
        }
        self.status.is_none_or(|status| task.status == status)
    }
}
