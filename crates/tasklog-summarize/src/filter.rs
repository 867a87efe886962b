//! Keyword heuristic separating work tasks from breaks and personal entries.
//!
//! Known limitation: this is a keyword heuristic, not a classifier. A title
//! like "workout" carries the work indicator "work" and is kept; a terse
//! work entry that only mentions "lunch" is dropped.

use tasklog_config::FilterConfig;
use tasklog_core::ParsedTask;

pub struct WorkFilter {
    work_indicators: Vec<String>,
    non_work_keywords: Vec<String>,
}

impl WorkFilter {
    #[must_use]
    pub fn new(config: &FilterConfig) -> Self {
        let lower = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            work_indicators: lower(&config.work_indicators),
            non_work_keywords: lower(&config.non_work_keywords),
        }
    }

    /// Keep work tasks, preserving input order.
    #[must_use]
    pub fn filter_work_tasks(&self, tasks: Vec<ParsedTask>) -> Vec<ParsedTask> {
        let before = tasks.len();
        let kept: Vec<_> = tasks.into_iter().filter(|t| self.is_work(t)).collect();
        tracing::debug!(before, after = kept.len(), "filtered work tasks");
        kept
    }

    #[must_use]
    pub fn is_work(&self, task: &ParsedTask) -> bool {
        if task.title.trim().is_empty() && task.description.trim().is_empty() {
            return false;
        }

        let text = format!("{} {}", task.title, task.description).to_lowercase();
        let tokens: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        if self
            .work_indicators
            .iter()
            .any(|keyword| text.contains(keyword.as_str()))
        {
            return true;
        }
        !any_non_work_keyword(&self.non_work_keywords, &text, &tokens)
    }
}

/// Work indicators match anywhere in the text ("fix" matches "hotfix").
/// Single-word non-work keywords only match token prefixes, so "date" does not
/// match "update"; multi-word ones match as substrings.
fn any_non_work_keyword(keywords: &[String], text: &str, tokens: &[&str]) -> bool {
    keywords.iter().any(|keyword| {
        if keyword.chars().all(char::is_alphanumeric) {
            tokens.iter().any(|t| t.starts_with(keyword.as_str()))
        } else {
            text.contains(keyword.as_str())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn filter() -> WorkFilter {
        WorkFilter::new(&FilterConfig::default())
    }

    #[rstest]
    #[case("Break", "coffee", false)]
    #[case("English class", "English class", false)]
    #[case("Lunch", "lunch with client", true)]
    #[case("Sprint 10", "fix login bug", true)]
    #[case("Docs", "update onboarding guide", true)]
    #[case("Misc", "read the newsletter", true)]
    #[case("Gym", "leg day", false)]
    #[case("", "   ", false)]
    #[case("Lunch", "hotfix for checkout", true)]
    #[case("Coffee", "redeploy api", true)]
    #[case("Break", "unittest flaky suite", true)]
    fn classifies_tasks(#[case] title: &str, #[case] description: &str, #[case] expected: bool) {
        assert_eq!(filter().is_work(&ParsedTask::new(title, description)), expected);
    }

    #[test]
    fn output_is_order_preserving_subsequence() {
        let tasks = vec![
            ParsedTask::new("Sprint 10", "fix login bug"),
            ParsedTask::new("Break", "Break"),
            ParsedTask::new("Sprint 11", "deploy"),
            ParsedTask::new("Yoga", "Yoga"),
            ParsedTask::new("General Tasks", "answer emails"),
        ];
        let kept = filter().filter_work_tasks(tasks);
        let titles: Vec<_> = kept.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Sprint 10", "Sprint 11", "General Tasks"]);
    }

    #[test]
    fn custom_lists_replace_defaults() {
        let config = FilterConfig {
            work_indicators: vec!["Invoice".into()],
            non_work_keywords: vec!["nap".into(), "day off".into()],
        };
        let filter = WorkFilter::new(&config);
        assert!(filter.is_work(&ParsedTask::new("invoices", "nap")));
        assert!(!filter.is_work(&ParsedTask::new("Friday", "taking a day off")));
        assert!(filter.is_work(&ParsedTask::new("Break", "coffee")));
    }
}
