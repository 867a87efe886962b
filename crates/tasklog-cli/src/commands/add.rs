use anyhow::Context;
use chrono::{DateTime, Utc};
use tasklog_config::TasklogConfig;
use tasklog_core::{TaskStatus, TrackedTask};
use tasklog_store::{JsonlTaskStore, Settings, SettingsStore};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AddArgs;
use crate::commands::shared::parse::parse_enum;
use crate::output::output;

/// Handle `tasklog add`.
pub fn handle(args: &AddArgs, config: &TasklogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = SettingsStore::new(&config.store.settings_path)
        .get_settings()
        .context("failed to read settings")?;
    let task = build_task(args, &settings, Utc::now())?;

    JsonlTaskStore::new(&config.store.tasks_path)
        .add_task(&task)
        .with_context(|| format!("failed to add task {}", task.id))?;
    tracing::info!(id = %task.id, "task added");

    output(&task, flags.format)
}

fn build_task(args: &AddArgs, settings: &Settings, now: DateTime<Utc>) -> anyhow::Result<TrackedTask> {
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| format!("task-{}", now.timestamp_millis()));
    let mut task = settings.new_task(id, args.title.as_deref(), args.description.as_deref(), now);

    if let Some(status) = &args.status {
        task.status = parse_enum::<TaskStatus>(status, "status")?;
        if task.status == TaskStatus::Done {
            task.end = Some(now);
        }
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tasklog_core::TaskStatus;
    use tasklog_store::Settings;

    use super::build_task;
    use crate::cli::root_commands::AddArgs;

    fn args(title: Option<&str>, status: Option<&str>) -> AddArgs {
        AddArgs {
            title: title.map(String::from),
            description: Some("fix login bug".into()),
            status: status.map(String::from),
            id: None,
        }
    }

    #[test]
    fn blank_title_uses_template() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
        let task = build_task(&args(None, None), &Settings::default(), now).expect("task");

        assert_eq!(task.title, "No title");
        assert_eq!(task.id, format!("task-{}", now.timestamp_millis()));
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.end.is_none());
    }

    #[test]
    fn done_tasks_get_an_end_time() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
        let task =
            build_task(&args(Some("Sprint 10"), Some("done")), &Settings::default(), now).expect("task");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.end, Some(now));
    }
}
