//! Staged progress reporting.
//!
//! [`ProgressReporter`] walks an ordered list of named stages and calls back
//! with each stage it reaches. [`DebouncedProgress`] sits in front of a
//! display and coalesces bursts of updates.

use std::time::{Duration, Instant};

use tasklog_config::StageConfig;

/// A named stage with the message and percentage shown for it.
pub type ProgressStage = StageConfig;

type StageCallback<'a> = Box<dyn FnMut(&ProgressStage) + Send + 'a>;

/// Reports progress through an ordered stage list.
///
/// The reporter tracks a position: the index of the next stage that has not
/// been reported or skipped. Unknown stage names are logged and ignored.
pub struct ProgressReporter<'a> {
    stages: Vec<ProgressStage>,
    position: usize,
    last_reported: Option<usize>,
    callback: StageCallback<'a>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(
        stages: Vec<ProgressStage>,
        callback: impl FnMut(&ProgressStage) + Send + 'a,
    ) -> Self {
        Self {
            stages,
            position: 0,
            last_reported: None,
            callback: Box::new(callback),
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let index = self.stages.iter().position(|s| s.name == name);
        if index.is_none() {
            tracing::warn!(stage = name, "unknown progress stage");
        }
        index
    }

    /// Report the named stage, or the next unreported stage for `None`.
    pub fn report(&mut self, name: Option<&str>) {
        let index = match name {
            Some(name) => match self.index_of(name) {
                Some(index) => index,
                None => return,
            },
            None if self.position < self.stages.len() => self.position,
            None => {
                tracing::warn!("no progress stage left to report");
                return;
            }
        };

        self.position = index + 1;
        self.last_reported = Some(index);
        (self.callback)(&self.stages[index]);
    }

    /// Move past the named stage, or the next stage for `None`, without
    /// reporting it.
    pub fn skip(&mut self, name: Option<&str>) {
        let index = match name {
            Some(name) => match self.index_of(name) {
                Some(index) => index,
                None => return,
            },
            None => self.position,
        };
        self.position = (index + 1).min(self.stages.len());
    }

    /// Start over from the first stage.
    pub const fn reset(&mut self) {
        self.position = 0;
        self.last_reported = None;
    }

    /// True once every stage has been reported or skipped.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.position >= self.stages.len()
    }

    /// The stage reported most recently.
    #[must_use]
    pub fn current_stage(&self) -> Option<&ProgressStage> {
        self.last_reported.map(|index| &self.stages[index])
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name.as_str())
    }
}

/// Render a stage as `"<message> (<percentage>%)"`.
#[must_use]
pub fn progress_message(stage: &ProgressStage) -> String {
    format!("{} ({}%)", stage.message, stage.percentage)
}

/// Coalesces updates that arrive within `window` of the last emitted one.
///
/// An update is emitted immediately once the window since the previous
/// emission has elapsed. Otherwise it replaces any pending update, which is
/// emitted by [`Self::flush`] or when the value is dropped.
pub struct DebouncedProgress<T, F: FnMut(T)> {
    window: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
    emit: F,
}

impl<T, F: FnMut(T)> DebouncedProgress<T, F> {
    pub const fn new(window: Duration, emit: F) -> Self {
        Self {
            window,
            last_emit: None,
            pending: None,
            emit,
        }
    }

    pub fn push(&mut self, update: T) {
        let now = Instant::now();
        let due = self
            .last_emit
            .is_none_or(|last| now.duration_since(last) >= self.window);
        if due {
            self.pending = None;
            self.last_emit = Some(now);
            (self.emit)(update);
        } else {
            self.pending = Some(update);
        }
    }

    /// Emit the pending update, if any.
    pub fn flush(&mut self) {
        if let Some(update) = self.pending.take() {
            self.last_emit = Some(Instant::now());
            (self.emit)(update);
        }
    }

    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T, F: FnMut(T)> Drop for DebouncedProgress<T, F> {
    fn drop(&mut self) {
        self.flush();
    }
}
