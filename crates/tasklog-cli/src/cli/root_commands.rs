use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Summarize tracked tasks into grouped work items.
    Summarize(SummarizeArgs),
    /// Add a task to the task log.
    Add(AddArgs),
    /// List tracked tasks.
    List(ListArgs),
    /// Print the JSON Schema of a tasklog document.
    Schema(SchemaArgs),
}

/// Which tasks to read from the store.
#[derive(Clone, Debug, Default, Args)]
pub struct TaskQuery {
    /// Only tasks created at or after this time (RFC 3339 or YYYY-MM-DD).
    #[arg(long)]
    pub since: Option<String>,

    /// Only tasks created before this time (RFC 3339 or YYYY-MM-DD).
    #[arg(long)]
    pub until: Option<String>,

    /// Only tasks with this status (pending, in-progress, done).
    #[arg(long)]
    pub status: Option<String>,
}

/// Arguments for `tasklog summarize`.
#[derive(Clone, Debug, Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub query: TaskQuery,

    /// Read tasks from a JSON array file instead of the task store.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Similarity above which two work items count as duplicates.
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Title grouping strategy (overrides configuration).
    #[arg(long)]
    pub strategy: Option<StrategyArg>,

    /// Skip the embedding model and group by title only.
    #[arg(long)]
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    Similarity,
    Classifier,
}

/// Arguments for `tasklog add`.
#[derive(Clone, Debug, Args)]
pub struct AddArgs {
    /// Task title (defaults to the configured template title).
    #[arg(long)]
    pub title: Option<String>,

    /// Task description.
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Initial status.
    #[arg(long)]
    pub status: Option<String>,

    /// Explicit task id (generated when omitted).
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for `tasklog list`.
#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub query: TaskQuery,

    /// Max tasks to show, newest last.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `tasklog schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Document type: task, tasks, summary
    #[arg(default_value = "tasks")]
    pub type_name: String,
}
