//! Final ordering and rendering of summary groups.

use std::cmp::Ordering;

use tasklog_core::{GENERAL_TASKS, SummaryGroup, TaskGroups};

/// Category labels that sort after every other title, in this order.
pub const TITLE_PRECEDENCE: [&str; 5] = [
    "Background Task",
    "Project Tasks",
    "Meetings",
    GENERAL_TASKS,
    "General Activities",
];

fn precedence(title: &str) -> Option<usize> {
    TITLE_PRECEDENCE.iter().position(|p| *p == title)
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    match (precedence(a), precedence(b)) {
        (None, None) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// Turn grouped items into sorted summary groups.
#[must_use]
pub fn format_groups(groups: TaskGroups) -> Vec<SummaryGroup> {
    format_summary(
        groups
            .into_iter()
            .map(|(title, tasks)| SummaryGroup::new(title, tasks))
            .collect(),
    )
}

/// Sort summary groups: titles outside [`TITLE_PRECEDENCE`] first,
/// case-insensitively, then the listed category labels in list order.
///
/// An empty title becomes "General Tasks" and groups with the same title are
/// merged. Applying this twice gives the same result as applying it once.
#[must_use]
pub fn format_summary(groups: Vec<SummaryGroup>) -> Vec<SummaryGroup> {
    let mut merged: Vec<SummaryGroup> = Vec::with_capacity(groups.len());
    for mut group in groups {
        if group.title.trim().is_empty() {
            group.title = GENERAL_TASKS.to_string();
        }
        match merged.iter_mut().find(|g| g.title == group.title) {
            Some(existing) => existing.tasks.extend(group.tasks),
            None => merged.push(group),
        }
    }
    merged.sort_by(|a, b| compare_titles(&a.title, &b.title));
    merged
}

/// Render groups as markdown: a `# title` heading followed by `- item` lines,
/// blocks separated by a blank line.
#[must_use]
pub fn render_markdown(groups: &[SummaryGroup]) -> String {
    groups
        .iter()
        .map(|group| {
            let mut block = format!("# {}", group.title);
            for task in &group.tasks {
                block.push_str("\n- ");
                block.push_str(task);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(title: &str, tasks: &[&str]) -> SummaryGroup {
        SummaryGroup::new(title, tasks.iter().map(ToString::to_string).collect())
    }

    fn titles(groups: &[SummaryGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn unlisted_titles_first_then_precedence() {
        let sorted = format_summary(vec![
            group("Meetings", &["standup"]),
            group("sprint 11", &["b"]),
            group("General Activities", &["emails"]),
            group("Background Task", &["monitoring"]),
            group("Sprint 10", &["a"]),
            group("API", &["c"]),
        ]);
        assert_eq!(
            titles(&sorted),
            vec![
                "API",
                "Sprint 10",
                "sprint 11",
                "Background Task",
                "Meetings",
                "General Activities"
            ]
        );
    }

    #[test]
    fn case_ties_fall_back_to_byte_order() {
        let sorted = format_summary(vec![group("alpha", &["x"]), group("Alpha", &["y"])]);
        assert_eq!(titles(&sorted), vec!["Alpha", "alpha"]);
    }

    #[test]
    fn empty_title_becomes_general_tasks_and_merges() {
        let sorted = format_summary(vec![
            group("", &["a"]),
            group("General Tasks", &["b"]),
            group("Sprint 10", &["c"]),
        ]);
        assert_eq!(
            sorted,
            vec![group("Sprint 10", &["c"]), group("General Tasks", &["a", "b"])]
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_summary(vec![
            group("Project Tasks", &["x"]),
            group("", &["y"]),
            group("zeta", &["z"]),
            group("Beta", &["w"]),
        ]);
        assert_eq!(format_summary(once.clone()), once);
    }

    #[test]
    fn order_depends_only_on_titles() {
        let input = vec![
            group("Meetings", &["standup"]),
            group("zeta", &["z"]),
            group("General Activities", &["emails"]),
            group("Alpha", &["a"]),
            group("Background Task", &["backup"]),
            group("alpha", &["b"]),
        ];
        let expected = format_summary(input.clone());

        for shift in 1..input.len() {
            let mut rotated = input.clone();
            rotated.rotate_left(shift);
            assert_eq!(format_summary(rotated), expected);
        }
        let mut reversed = input;
        reversed.reverse();
        assert_eq!(format_summary(reversed), expected);
        assert_eq!(
            titles(&expected),
            vec![
                "Alpha",
                "alpha",
                "zeta",
                "Background Task",
                "Meetings",
                "General Activities",
            ]
        );
    }

    #[test]
    fn format_groups_keeps_items() {
        let mut groups = TaskGroups::new();
        groups.extend("Meetings", vec!["standup".to_string()]);
        groups.extend("Sprint 10", vec!["fix login bug".to_string()]);
        assert_eq!(
            format_groups(groups),
            vec![group("Sprint 10", &["fix login bug"]), group("Meetings", &["standup"])]
        );
    }

    #[test]
    fn renders_markdown_blocks() {
        let text = render_markdown(&[group("Sprint 10", &["a", "b"]), group("Meetings", &["c"])]);
        assert_eq!(text, "# Sprint 10\n- a\n- b\n\n# Meetings\n- c");
        assert_eq!(render_markdown(&[]), "");
    }
}
