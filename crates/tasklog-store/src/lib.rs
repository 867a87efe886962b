//! # tasklog-store
//!
//! Persistence for tracked tasks and user settings.
//!
//! [`TaskStore`] is the interface the summarizer's host reads snapshots
//! through. [`JsonlTaskStore`] implements it over a JSONL file, one task per
//! line. Every successful write notifies the store's watchers with the new
//! snapshot.

pub mod error;
pub mod filter;
pub mod jsonl;
pub mod settings;
pub mod watch;

pub use error::StoreError;
pub use filter::TaskFilter;
pub use jsonl::JsonlTaskStore;
pub use settings::{Settings, SettingsStore, TaskTemplate};
pub use watch::{WatchHandle, Watchers};

use tasklog_core::TrackedTask;

/// Read, replace, and observe the full task snapshot.
pub trait TaskStore {
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn get_tasks(&self, filter: Option<&TaskFilter>) -> Result<Vec<TrackedTask>, StoreError>;

    /// Replace the stored snapshot with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a task is invalid, ids repeat, or the
    /// write fails.
    fn save_tasks(&self, tasks: &[TrackedTask]) -> Result<(), StoreError>;

    /// Subscribe to snapshot changes until the handle is dropped.
    fn watch(&self, callback: impl Fn(&[TrackedTask]) + Send + Sync + 'static) -> WatchHandle;
}
