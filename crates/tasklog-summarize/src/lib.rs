//! # tasklog-summarize
//!
//! Turns a list of tracked tasks into a few grouped, deduplicated summaries.
//!
//! The stages are usable on their own:
//! - [`Normalizer`] and [`WorkFilter`] clean up and select work tasks
//! - [`parse`] splits descriptions into work items, merging comma fragments
//!   with the help of a [`SentenceValidator`]
//! - [`group`] partitions tasks by title, by embedding similarity or through a
//!   [`TitleClassifier`]
//! - [`dedup`] removes exact and near-duplicate work items across groups
//! - [`format`] sorts and renders the result
//!
//! [`Summarizer`] runs them in order with staged progress reporting and falls
//! back to plain title grouping when a model-backed step fails.

pub mod classify;
pub mod cluster;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod format;
pub mod group;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod progress;
mod prototype;
pub mod validity;


pub use classify::{PrototypeTitleClassifier, TitleClassifier};
pub use cluster::{greedy_clusters, is_numeric_variant};
pub use dedup::{dedupe, dedupe_exact};
pub use error::SummarizeError;
pub use filter::WorkFilter;
pub use format::{format_groups, format_summary, render_markdown};
pub use normalize::Normalizer;
pub use parse::parse_description;
pub use pipeline::{DefaultSummarizer, Summarizer};
pub use progress::{DebouncedProgress, ProgressReporter, ProgressStage, progress_message};
pub use validity::{
    ConfiguredValidator, HeuristicSentenceValidator, PrototypeSentenceValidator,
    SentenceValidator,
};
