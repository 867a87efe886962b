//! Task status and title category enums.
//!
//! `TaskStatus` serializes in kebab-case to match the stored task format
//! (`"in-progress"`). `TitleCategory` carries the fixed index order used by
//! title classifiers and the human labels used as summary group titles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a tracked task.
///
/// ```text
/// pending → in-progress → done
///         → done
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Done],
            Self::InProgress => &[Self::Done],
            Self::Done => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TitleCategory
// ---------------------------------------------------------------------------

/// Category assigned to a task title by a title classifier.
///
/// Declaration order is the classifier's output index order:
///
/// | index | key | label |
/// |---|---|---|
/// | 0 | `valid_title` | Valid Title |
/// | 1 | `background_task` | Background Task |
/// | 2 | `meetings` | Meetings |
/// | 3 | `general_tasks` | General Tasks |
/// | 4 | `general_activities` | General Activities |
/// | 5 | `project_tasks` | Project Tasks |
///
/// `ValidTitle` means the title itself is fit to head a summary group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TitleCategory {
    ValidTitle,
    BackgroundTask,
    Meetings,
    GeneralTasks,
    GeneralActivities,
    ProjectTasks,
}

impl TitleCategory {
    /// All categories in index order.
    pub const ALL: [Self; 6] = [
        Self::ValidTitle,
        Self::BackgroundTask,
        Self::Meetings,
        Self::GeneralTasks,
        Self::GeneralActivities,
        Self::ProjectTasks,
    ];

    /// Map a classifier output index to its category.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCategory`] for indices outside `0..6`.
    pub fn from_index(index: usize) -> Result<Self, CoreError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(CoreError::UnknownCategory(index))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidTitle => "valid_title",
            Self::BackgroundTask => "background_task",
            Self::Meetings => "meetings",
            Self::GeneralTasks => "general_tasks",
            Self::GeneralActivities => "general_activities",
            Self::ProjectTasks => "project_tasks",
        }
    }

    /// Human-readable label used as a summary group title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ValidTitle => "Valid Title",
            Self::BackgroundTask => "Background Task",
            Self::Meetings => "Meetings",
            Self::GeneralTasks => "General Tasks",
            Self::GeneralActivities => "General Activities",
            Self::ProjectTasks => "Project Tasks",
        }
    }

    /// Whether titles in this category keep their own group instead of
    /// collapsing into the category group.
    #[must_use]
    pub const fn keeps_own_title(self) -> bool {
        matches!(self, Self::ValidTitle)
    }
}

impl fmt::Display for TitleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
