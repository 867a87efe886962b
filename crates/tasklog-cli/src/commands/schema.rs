use std::path::Path;

use anyhow::{Context, bail};
use schemars::schema_for;
use serde_json::Value;
use tasklog_core::{SummaryGroup, TrackedTask};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// JSON Schema of a tasklog document type.
pub fn schema_value(type_name: &str) -> anyhow::Result<Value> {
    let schema = match type_name {
        "task" => schema_for!(TrackedTask),
        "tasks" => schema_for!(Vec<TrackedTask>),
        "summary" => schema_for!(Vec<SummaryGroup>),
        other => bail!("unknown schema type '{other}' (expected task, tasks, or summary)"),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Read a JSON array of tasks, checking it against the `tasks` schema and the
/// task invariants before deserializing.
pub fn load_tasks_file(path: &Path) -> anyhow::Result<Vec<TrackedTask>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let instance: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let schema = schema_value("tasks")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|error| anyhow::anyhow!("task schema is invalid: {error}"))?;
    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| format!("{e}"))
        .collect();
    if !errors.is_empty() {
        bail!(
            "{} does not match the tasks schema:\n  {}",
            path.display(),
            errors.join("\n  ")
        );
    }

    let tasks: Vec<TrackedTask> = serde_json::from_value(instance)?;
    for task in &tasks {
        task.validate()?;
    }
    tracing::debug!(count = tasks.len(), path = %path.display(), "loaded tasks file");
    Ok(tasks)
}

/// Handle `tasklog schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(&args.type_name)?, flags.format)
}
