//! Work-item deduplication.
//!
//! Exact duplicates are removed per group. Near duplicates are removed
//! globally: every group's items are clustered together and only cluster
//! seeds survive, so an item that paraphrases one in an earlier group is
//! dropped from its own group.

use std::collections::HashSet;

use tasklog_core::{TaskGroups, WorkItem};
use tasklog_embeddings::Embedder;

use crate::cluster::cluster_vectors;
use crate::error::{SummarizeError, check_len};

fn unique_in_order(items: Vec<WorkItem>) -> Vec<WorkItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Per-group exact dedup keeping first occurrences. Empty groups are dropped.
#[must_use]
pub fn dedupe_exact(groups: TaskGroups) -> TaskGroups {
    let mut deduped: TaskGroups = groups
        .into_iter()
        .map(|(label, items)| (label, unique_in_order(items)))
        .collect();
    deduped.retain_non_empty();
    deduped
}

/// Exact then semantic dedup.
///
/// When at most one distinct item exists across all groups the exact result
/// is returned as is. Otherwise items whose trimmed length is below
/// `min_item_chars` are dropped, and the rest are clustered across all groups
/// with `threshold`; each group keeps, in order, those of its own items that
/// seeded a cluster.
///
/// # Errors
///
/// Returns an error if embedding the items fails.
pub async fn dedupe<E: Embedder>(
    groups: TaskGroups,
    embedder: &E,
    threshold: f32,
    min_item_chars: usize,
) -> Result<TaskGroups, SummarizeError> {
    let groups = dedupe_exact(groups);

    let flattened: Vec<WorkItem> = groups
        .iter()
        .flat_map(|(_, items)| items.iter().cloned())
        .collect();
    let unique = unique_in_order(flattened);
    if unique.len() <= 1 {
        return Ok(groups);
    }

    let unique: Vec<WorkItem> = unique
        .into_iter()
        .filter(|item| item.trim().chars().count() >= min_item_chars)
        .collect();
    if unique.len() <= 1 {
        let kept: HashSet<&str> = unique.iter().map(String::as_str).collect();
        return Ok(retain_items(&groups, &kept));
    }

    let vectors = embedder.embed(&unique).await?;
    check_len("embedder", unique.len(), vectors.len())?;

    let survivors: HashSet<&str> = cluster_vectors(&vectors, threshold)
        .into_iter()
        .map(|cluster| unique[cluster[0]].as_str())
        .collect();

    tracing::debug!(
        before = unique.len(),
        after = survivors.len(),
        "removed similar work items"
    );

    Ok(retain_items(&groups, &survivors))
}

fn retain_items(groups: &TaskGroups, kept: &HashSet<&str>) -> TaskGroups {
    let mut rebuilt: TaskGroups = groups
        .iter()
        .map(|(label, items)| {
            let items: Vec<WorkItem> = items
                .iter()
                .filter(|item| kept.contains(item.as_str()))
                .cloned()
                .collect();
            (label.to_string(), items)
        })
        .collect();
    rebuilt.retain_non_empty();
    rebuilt
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklog_embeddings::test_support::BagOfWords;
    use pretty_assertions::assert_eq;

    fn groups(entries: &[(&str, &[&str])]) -> TaskGroups {
        entries
            .iter()
            .map(|(label, items)| {
                (
                    (*label).to_string(),
                    items.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn exact_dedup_keeps_first_occurrence_per_group() {
        let input = groups(&[
            ("A", &["write tests", "deploy", "write tests"]),
            ("B", &["write tests"]),
        ]);
        assert_eq!(
            dedupe_exact(input),
            groups(&[("A", &["write tests", "deploy"]), ("B", &["write tests"])])
        );
    }

    #[tokio::test]
    async fn paraphrase_in_later_group_is_removed() {
        let input = groups(&[
            ("Sprint 10", &["fix login bug", "write unit tests"]),
            ("Sprint 11", &["fixed the login bug issue", "plan release"]),
        ]);
        let result = dedupe(input, &BagOfWords::default(), 0.5, 4).await.unwrap();
        assert_eq!(
            result,
            groups(&[
                ("Sprint 10", &["fix login bug", "write unit tests"]),
                ("Sprint 11", &["plan release"]),
            ])
        );
    }

    #[tokio::test]
    async fn paraphrase_is_kept_under_a_strict_threshold() {
        let input = groups(&[("A", &["fix login bug", "fixed the login bug issue"])]);
        let result = dedupe(input.clone(), &BagOfWords::default(), 0.9, 4)
            .await
            .unwrap();
        assert_eq!(result, input);
    }

    #[tokio::test]
    async fn short_items_are_dropped() {
        let input = groups(&[("A", &["qa", "write tests"]), ("B", &["ok"])]);
        let result = dedupe(input, &BagOfWords::default(), 0.7, 4).await.unwrap();
        assert_eq!(result, groups(&[("A", &["write tests"])]));
    }

    #[tokio::test]
    async fn lone_short_item_survives() {
        let embedder = BagOfWords::default();
        let input = groups(&[("Ops", &["Ops"])]);
        let result = dedupe(input.clone(), &embedder, 0.7, 4).await.unwrap();
        assert_eq!(result, input);
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn single_unique_item_skips_the_embedder() {
        let embedder = BagOfWords::default();
        let input = groups(&[("A", &["write tests"]), ("B", &["write tests"])]);
        let result = dedupe(input.clone(), &embedder, 0.7, 4).await.unwrap();
        assert_eq!(result, input);
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn dedup_is_idempotent() {
        let input = groups(&[
            ("A", &["fix login bug", "fix login bug", "review the pull request"]),
            ("B", &["fixed the login bug issue", "update docs"]),
        ]);
        let embedder = BagOfWords::default();
        let once = dedupe(input, &embedder, 0.5, 4).await.unwrap();
        let twice = dedupe(once.clone(), &embedder, 0.5, 4).await.unwrap();
        assert_eq!(once, twice);
    }
}
