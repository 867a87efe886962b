//! Grouping tasks by title.
//!
//! Grouping happens in two steps. First the distinct titles are partitioned
//! into [`TitleGroup`]s by one of the strategies below. Then every group's
//! member descriptions are parsed into work items ([`parse_groups`]).

use tasklog_core::{ParsedTask, TaskGroups, TitleCategory};
use tasklog_embeddings::Embedder;

use crate::classify::TitleClassifier;
use crate::cluster::{cluster_vectors, numeric_variant_flags};
use crate::error::{SummarizeError, check_len};
use crate::parse::{parse_description, parse_description_plain};
use crate::validity::SentenceValidator;

/// A label and the indices of the tasks filed under it, in task order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleGroup {
    pub label: String,
    pub members: Vec<usize>,
}

/// Distinct titles in first-seen order.
#[must_use]
pub fn distinct_titles(tasks: &[ParsedTask]) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for task in tasks {
        if !titles.contains(&task.title) {
            titles.push(task.title.clone());
        }
    }
    titles
}

/// Similarity strategy.
///
/// Titles that are numeric variants of another title ("Sprint 10" and
/// "Sprint 11") stay in groups of their own. The remaining titles are
/// clustered by embedding similarity, and each cluster is labeled by its
/// seed title. Groups come out in first-seen order of their label.
///
/// # Errors
///
/// Returns an error if embedding the titles fails.
pub async fn group_by_similarity<E: Embedder>(
    tasks: &[ParsedTask],
    embedder: &E,
    threshold: f32,
) -> Result<Vec<TitleGroup>, SummarizeError> {
    let titles = distinct_titles(tasks);
    let variants = numeric_variant_flags(&titles);

    let (singles, rest): (Vec<usize>, Vec<usize>) = (0..titles.len()).partition(|&i| variants[i]);

    // Clusters as lists of indices into `titles`, seed first.
    let mut clusters: Vec<Vec<usize>> = singles.into_iter().map(|i| vec![i]).collect();
    if rest.len() < 2 {
        clusters.extend(rest.into_iter().map(|i| vec![i]));
    } else {
        let texts: Vec<String> = rest.iter().map(|&i| titles[i].clone()).collect();
        let vectors = embedder.embed(&texts).await?;
        check_len("embedder", texts.len(), vectors.len())?;
        clusters.extend(
            cluster_vectors(&vectors, threshold)
                .into_iter()
                .map(|cluster| cluster.into_iter().map(|c| rest[c]).collect()),
        );
    }
    clusters.sort_by_key(|cluster| cluster[0]);

    tracing::debug!(titles = titles.len(), groups = clusters.len(), "clustered titles");

    Ok(clusters
        .into_iter()
        .map(|cluster| {
            let members: Vec<&str> = cluster.iter().map(|&i| titles[i].as_str()).collect();
            TitleGroup {
                label: titles[cluster[0]].clone(),
                members: members_with_titles(tasks, &members),
            }
        })
        .collect())
}

/// Classifier strategy.
///
/// `ValidTitle` titles keep their own group each; every other category
/// collapses into one group labeled with the category label. Categories
/// appear in first-seen order.
///
/// # Errors
///
/// Returns an error if the classifier fails or answers for the wrong number
/// of titles.
pub async fn group_by_classifier<C: TitleClassifier>(
    tasks: &[ParsedTask],
    classifier: &C,
) -> Result<Vec<TitleGroup>, SummarizeError> {
    let titles = distinct_titles(tasks);
    if titles.is_empty() {
        return Ok(Vec::new());
    }
    let categories = classifier.classify(&titles).await?;
    check_len("title classifier", titles.len(), categories.len())?;

    let mut order: Vec<TitleCategory> = Vec::new();
    for category in &categories {
        if !order.contains(category) {
            order.push(*category);
        }
    }

    let mut groups = Vec::new();
    for category in order {
        let in_category: Vec<&str> = titles
            .iter()
            .zip(&categories)
            .filter(|(_, c)| **c == category)
            .map(|(t, _)| t.as_str())
            .collect();

        if category.keeps_own_title() {
            for title in in_category {
                push_group(&mut groups, title, members_with_titles(tasks, &[title]));
            }
        } else {
            push_group(
                &mut groups,
                category.label(),
                members_with_titles(tasks, &in_category),
            );
        }
    }
    Ok(groups)
}

/// Fallback strategy: titles that match after case folding and whitespace
/// collapsing share a group, labeled by the first title seen.
#[must_use]
pub fn group_by_normalized_title(tasks: &[ParsedTask]) -> Vec<TitleGroup> {
    let mut keys: Vec<String> = Vec::new();
    let mut groups: Vec<TitleGroup> = Vec::new();

    for (index, task) in tasks.iter().enumerate() {
        let key = title_key(&task.title);
        match keys.iter().position(|k| *k == key) {
            Some(slot) => groups[slot].members.push(index),
            None => {
                keys.push(key);
                groups.push(TitleGroup {
                    label: task.title.clone(),
                    members: vec![index],
                });
            }
        }
    }
    groups
}

fn title_key(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse each group's member descriptions into work items.
///
/// Groups without any work item are omitted.
///
/// # Errors
///
/// Returns an error if the sentence validator fails.
pub async fn parse_groups<V: SentenceValidator>(
    tasks: &[ParsedTask],
    groups: &[TitleGroup],
    validator: &V,
) -> Result<TaskGroups, SummarizeError> {
    let mut parsed = TaskGroups::new();
    for group in groups {
        let mut items = Vec::new();
        for &member in &group.members {
            items.extend(parse_description(&tasks[member].description, validator).await?);
        }
        if !items.is_empty() {
            parsed.extend(&group.label, items);
        }
        tokio::task::yield_now().await;
    }
    Ok(parsed)
}

/// [`parse_groups`] without fragment merging.
#[must_use]
pub fn parse_groups_plain(tasks: &[ParsedTask], groups: &[TitleGroup]) -> TaskGroups {
    let mut parsed = TaskGroups::new();
    for group in groups {
        let items: Vec<_> = group
            .members
            .iter()
            .flat_map(|&m| parse_description_plain(&tasks[m].description))
            .collect();
        if !items.is_empty() {
            parsed.extend(&group.label, items);
        }
    }
    parsed
}

fn members_with_titles(tasks: &[ParsedTask], titles: &[&str]) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| titles.contains(&t.title.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Append a group, merging into an existing group with the same label.
fn push_group(groups: &mut Vec<TitleGroup>, label: &str, members: Vec<usize>) {
    match groups.iter_mut().find(|g| g.label == label) {
        Some(existing) => {
            existing.members.extend(members);
            existing.members.sort_unstable();
            existing.members.dedup();
        }
        None => groups.push(TitleGroup {
            label: label.to_string(),
            members,
        }),
    }
}
