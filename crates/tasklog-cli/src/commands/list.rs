use anyhow::Context;
use tasklog_config::TasklogConfig;
use tasklog_store::{JsonlTaskStore, TaskStore};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::query::task_filter;
use crate::output::output;

/// Handle `tasklog list`.
pub fn handle(args: &ListArgs, config: &TasklogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = task_filter(&args.query)?;
    let mut tasks = JsonlTaskStore::new(&config.store.tasks_path)
        .get_tasks(Some(&filter))
        .context("failed to read tasks")?;

    if let Some(limit) = args.limit {
        let excess = tasks.len().saturating_sub(limit);
        tasks.drain(..excess);
    }

    output(tasks.as_slice(), flags.format)
}
