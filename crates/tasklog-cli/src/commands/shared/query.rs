use tasklog_core::TaskStatus;
use tasklog_store::TaskFilter;

use crate::cli::root_commands::TaskQuery;
use crate::commands::shared::parse::{parse_enum, parse_time};

/// Turn `--since/--until/--status` into a store filter.
pub fn task_filter(query: &TaskQuery) -> anyhow::Result<TaskFilter> {
    let mut filter = TaskFilter::default();
    if let Some(since) = &query.since {
        filter = filter.created_after(parse_time(since, "since")?);
    }
    if let Some(until) = &query.until {
        filter = filter.created_before(parse_time(until, "until")?);
    }
    if let Some(status) = &query.status {
        filter = filter.status(parse_enum::<TaskStatus>(status, "status")?);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use tasklog_core::TaskStatus;

    use super::task_filter;
    use crate::cli::root_commands::TaskQuery;

    #[test]
    fn empty_query_matches_everything() {
        let filter = task_filter(&TaskQuery::default()).expect("filter should build");
        assert_eq!(filter, tasklog_store::TaskFilter::default());
    }

    #[test]
    fn status_and_range_are_applied() {
        let query = TaskQuery {
            since: Some("2025-03-04T00:00:00Z".into()),
            until: None,
            status: Some("done".into()),
        };
        let filter = task_filter(&query).expect("filter should build");
        assert_eq!(filter.status, Some(TaskStatus::Done));
        assert!(filter.created_after.is_some());
        assert!(filter.created_before.is_none());
    }

    #[test]
    fn bad_status_is_reported() {
        let query = TaskQuery {
            status: Some("blocked".into()),
            ..TaskQuery::default()
        };
        assert!(task_filter(&query).is_err());
    }
}
