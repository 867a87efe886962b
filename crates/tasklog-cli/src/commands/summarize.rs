use std::time::Duration;

use anyhow::{Context, bail};
use tasklog_config::{GroupingStrategy, TasklogConfig};
use tasklog_core::{SummaryGroup, TrackedTask};
use tasklog_store::{JsonlTaskStore, TaskStore};
use tasklog_summarize::{DebouncedProgress, DefaultSummarizer};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{StrategyArg, SummarizeArgs};
use crate::commands::schema::load_tasks_file;
use crate::commands::shared::query::task_filter;
use crate::output::output;
use crate::progress::Progress;

/// Handle `tasklog summarize`.
pub async fn handle(
    args: &SummarizeArgs,
    mut config: TasklogConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Some(strategy) = args.strategy {
        config.summarize.strategy = match strategy {
            StrategyArg::Similarity => GroupingStrategy::Similarity,
            StrategyArg::Classifier => GroupingStrategy::Classifier,
        };
    }
    let threshold = args
        .threshold
        .unwrap_or(config.summarize.similarity_threshold);
    if !(-1.0..=1.0).contains(&threshold) {
        bail!("--threshold must be within [-1, 1], got {threshold}");
    }

    let tasks = read_tasks(args, &config)?;
    tracing::debug!(count = tasks.len(), "summarizing tasks");

    let summarizer =
        DefaultSummarizer::from_config(&config).context("failed to build summarizer")?;
    let summary = if args.offline {
        summarizer.fallback(&tasks)
    } else {
        run_with_spinner(&summarizer, &tasks, threshold, config.progress.debounce_ms).await
    };

    output(summary.as_slice(), flags.format)
}

fn read_tasks(args: &SummarizeArgs, config: &TasklogConfig) -> anyhow::Result<Vec<TrackedTask>> {
    let filter = task_filter(&args.query)?;
    match &args.input {
        Some(path) => {
            let mut tasks = load_tasks_file(path)?;
            tasks.retain(|task| filter.matches(task));
            Ok(tasks)
        }
        None => JsonlTaskStore::new(&config.store.tasks_path)
            .get_tasks(Some(&filter))
            .context("failed to read tasks"),
    }
}

async fn run_with_spinner(
    summarizer: &DefaultSummarizer,
    tasks: &[TrackedTask],
    threshold: f32,
    debounce_ms: u64,
) -> Vec<SummaryGroup> {
    let spinner = Progress::spinner("summarizing");
    let summary = {
        let mut debounced =
            DebouncedProgress::new(Duration::from_millis(debounce_ms), |message: String| {
                spinner.set_message(&message);
            });
        summarizer
            .summarize_with_progress(tasks, threshold, |message| {
                debounced.push(message.to_string());
            })
            .await
    };
    spinner.finish_clear();
    summary
}
