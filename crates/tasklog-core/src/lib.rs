//! # tasklog-core
//!
//! Core types and error types for tasklog.
//!
//! This crate provides the foundational types shared across all tasklog crates:
//! - [`TrackedTask`](entities::TrackedTask), the stored time-tracked record
//! - [`ParsedTask`](entities::ParsedTask), its normalized pipeline form
//! - [`SummaryGroup`](entities::SummaryGroup) and [`TaskGroups`](entities::TaskGroups)
//! - Status and title-category enums
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;

pub use entities::{ParsedTask, SummaryGroup, TaskGroups, TrackedTask, WorkItem};
pub use enums::{TaskStatus, TitleCategory};
pub use errors::CoreError;

/// Title used when a task has no title, and the label of the general-tasks category.
pub const GENERAL_TASKS: &str = "General Tasks";
