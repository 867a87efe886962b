//! Entity structs for tasklog domain objects.
//!
//! `TrackedTask` is the persisted record; `ParsedTask`, `TaskGroups`, and
//! `SummaryGroup` are ephemeral values built and discarded per summarization run.

mod summary;
mod task;

pub use summary::{SummaryGroup, TaskGroups, WorkItem};
pub use task::{ParsedTask, TrackedTask};
