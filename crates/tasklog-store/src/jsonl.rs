//! JSONL-backed task store.
//!
//! One [`TrackedTask`] per line in camelCase JSON. Appends go through
//! `serde_jsonlines::append_json_lines`; whole-snapshot writes rewrite the file.

use std::path::{Path, PathBuf};

use tasklog_core::{CoreError, TaskStatus, TrackedTask};

use crate::TaskStore;
use crate::error::StoreError;
use crate::filter::TaskFilter;
use crate::watch::{WatchHandle, Watchers};

pub struct JsonlTaskStore {
    path: PathBuf,
    watchers: Watchers<[TrackedTask]>,
}

impl JsonlTaskStore {
    /// Open a store at `path`. The file is created on the first write.
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

    /// Append one task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] if the task fails validation,
    /// [`StoreError::Duplicate`] if its id is taken, or [`StoreError::Io`].
    pub fn add_task(&self, task: &TrackedTask) -> Result<(), StoreError> {
        task.validate()?;
        let mut tasks = self.read_all()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::Duplicate {
                id: task.id.clone(),
            });
        }

        self.ensure_parent()?;
        serde_jsonlines::append_json_lines(&self.path, [task])?;
        tracing::debug!(id = %task.id, "task added");

        tasks.push(task.clone());
        self.watchers.notify(&tasks);
        Ok(())
    }

    /// Replace the task with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no task has that id, or
    /// [`StoreError::Invalid`] if the replacement fails validation.
    pub fn update_task(&self, task: &TrackedTask) -> Result<(), StoreError> {
        task.validate()?;
        let mut tasks = self.read_all()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| StoreError::NotFound {
                id: task.id.clone(),
            })?;
        *slot = task.clone();
        self.save_tasks(&tasks)
    }

    /// Move a task to `status`, enforcing the allowed transitions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::Invalid`] for a disallowed transition.
    pub fn set_status(&self, id: &str, status: TaskStatus) -> Result<TrackedTask, StoreError> {
        let mut task = self
            .read_all()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        if task.status != status && !task.status.can_transition_to(status) {
            return Err(CoreError::Validation(format!(
                "task {id} cannot move from {} to {status}",
                task.status
            ))
            .into());
        }
        task.status = status;
        self.update_task(&task)?;
        Ok(task)
    }

    /// Remove a task by id, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no task has that id.
    pub fn delete_task(&self, id: &str) -> Result<TrackedTask, StoreError> {
        let mut tasks = self.read_all()?;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        let removed = tasks.remove(index);
        self.save_tasks(&tasks)?;
        Ok(removed)
    }

    fn read_all(&self) -> Result<Vec<TrackedTask>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let tasks = serde_jsonlines::json_lines(&self.path)?.collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TaskStore for JsonlTaskStore {
    fn get_tasks(&self, filter: Option<&TaskFilter>) -> Result<Vec<TrackedTask>, StoreError> {
        let mut tasks = self.read_all()?;
        if let Some(filter) = filter {
            tasks.retain(|t| filter.matches(t));
        }
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[TrackedTask]) -> Result<(), StoreError> {
        for (i, task) in tasks.iter().enumerate() {
            task.validate()?;
            if tasks[..i].iter().any(|t| t.id == task.id) {
                return Err(StoreError::Duplicate {
                    id: task.id.clone(),
                });
            }
        }

        self.ensure_parent()?;
        serde_jsonlines::write_json_lines(&self.path, tasks)?;
        tracing::debug!(count = tasks.len(), path = %self.path.display(), "tasks saved");

        self.watchers.notify(tasks);
        Ok(())
    }

    fn watch(&self, callback: impl Fn(&[TrackedTask]) + Send + Sync + 'static) -> WatchHandle {
        self.watchers.subscribe(callback)
    }
}
