use serde::Serialize;
use serde_json::Value;
use tasklog_core::{SummaryGroup, TrackedTask};
use tasklog_summarize::render_markdown;

use crate::cli::OutputFormat;

/// Human-readable rendering used by `--format text`.
pub trait TextView {
    fn text(&self) -> String;
}

impl TextView for [SummaryGroup] {
    fn text(&self) -> String {
        if self.is_empty() {
            return String::from("(no work items)");
        }
        render_markdown(self)
    }
}

impl TextView for TrackedTask {
    fn text(&self) -> String {
        let mut line = format!(
            "{}  {:<11}  {}  {}",
            self.id,
            self.status.as_str(),
            self.created_at.format("%Y-%m-%d %H:%M"),
            self.title
        );
        if !self.description.trim().is_empty() {
            line.push_str(": ");
            line.push_str(&self.description.replace('\n', " / "));
        }
        line
    }
}

impl TextView for [TrackedTask] {
    fn text(&self) -> String {
        if self.is_empty() {
            return String::from("(no tasks)");
        }
        self.iter()
            .map(TextView::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextView for Value {
    fn text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

/// Render a response to a string in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> anyhow::Result<String>
where
    T: Serialize + TextView + ?Sized,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(value.text()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T>(value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + TextView + ?Sized,
{
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}
