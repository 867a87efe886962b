//! Greedy single-link clustering and the numeric-variant rule.
//!
//! [`greedy_clusters`] is the one clustering primitive used for both title
//! grouping and work-item deduplication. Items are visited in order; each
//! unclaimed item seeds a cluster and claims every later unclaimed item whose
//! similarity to the seed is strictly above the threshold. Comparisons are
//! seed-to-candidate only, so membership is not transitive, and the seed is
//! always the first member.

use std::sync::LazyLock;

use regex::Regex;
use tasklog_embeddings::cosine_similarity;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)*").expect("digit run regex"));

/// Cluster `items` into lists of indices. Each cluster starts with its seed.
pub fn greedy_clusters<T>(
    items: &[T],
    threshold: f32,
    similarity: impl Fn(&T, &T) -> f32,
) -> Vec<Vec<usize>> {
    let mut claimed = vec![false; items.len()];
    let mut clusters = Vec::new();

    for seed in 0..items.len() {
        if claimed[seed] {
            continue;
        }
        claimed[seed] = true;
        let mut cluster = vec![seed];

        for candidate in (seed + 1)..items.len() {
            if !claimed[candidate] && similarity(&items[seed], &items[candidate]) > threshold {
                claimed[candidate] = true;
                cluster.push(candidate);
            }
        }
        clusters.push(cluster);
    }

    clusters
}

/// [`greedy_clusters`] over embedding vectors with cosine similarity.
#[must_use]
pub fn cluster_vectors(vectors: &[Vec<f32>], threshold: f32) -> Vec<Vec<usize>> {
    greedy_clusters(vectors, threshold, |a, b| cosine_similarity(a, b))
}

/// Two titles are numeric variants when they read the same once digit runs
/// are removed, carry the same number of digit runs, and differ in at least
/// one of them ("Sprint 10" and "Sprint 11"). Titles with a different number
/// of digit runs are never variants ("Sprint 10" and "Sprint 10 11").
#[must_use]
pub fn is_numeric_variant(a: &str, b: &str) -> bool {
    let text = |s: &str| DIGIT_RUN.replace_all(s, "").trim().to_string();
    if text(a) != text(b) {
        return false;
    }

    let runs_a: Vec<&str> = DIGIT_RUN.find_iter(a).map(|m| m.as_str()).collect();
    let runs_b: Vec<&str> = DIGIT_RUN.find_iter(b).map(|m| m.as_str()).collect();
    runs_a.len() == runs_b.len() && runs_a.iter().zip(&runs_b).any(|(x, y)| x != y)
}

/// Flag every title that is a numeric variant of some other title in the list.
#[must_use]
pub fn numeric_variant_flags(titles: &[String]) -> Vec<bool> {
    let mut flags = vec![false; titles.len()];
    for i in 0..titles.len() {
        for j in (i + 1)..titles.len() {
            if is_numeric_variant(&titles[i], &titles[j]) {
                flags[i] = true;
                flags[j] = true;
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Sprint 10", "Sprint 11", true)]
    #[case("Sprint 10", "Release 10", false)]
    #[case("Sprint 10", "Sprint 10", false)]
    #[case("v1.2 rollout", "v1.3 rollout", true)]
    #[case("Sprint 10", "Sprint 10 11", false)]
    #[case("Sprint", "Sprint 1", false)]
    #[case("Planning", "Review", false)]
    fn numeric_variant_rule(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
        assert_eq!(is_numeric_variant(a, b), expected);
        assert_eq!(is_numeric_variant(b, a), expected);
    }

    #[test]
    fn flags_every_participant() {
        let titles: Vec<String> = ["Sprint 10", "Meetings", "Sprint 11", "Sprint 12"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(numeric_variant_flags(&titles), vec![true, false, true, true]);
    }

    #[test]
    fn seed_represents_and_comparisons_are_not_transitive() {
        // a~b and b~c, but a and c are far apart: c must seed its own cluster.
        let points = [0.0_f32, 1.0, 2.0];
        let clusters = greedy_clusters(&points, 0.0, |x, y| 1.5 - (x - y).abs());
        assert_eq!(clusters, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn threshold_is_strict() {
        let clusters = greedy_clusters(&[1, 1], 1.0, |_, _| 1.0);
        assert_eq!(clusters, vec![vec![0], vec![1]]);
    }

    #[test]
    fn claimed_items_are_skipped_as_candidates() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.01], vec![0.01, 1.0]];
        let clusters = cluster_vectors(&vectors, 0.9);
        assert_eq!(clusters, vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn empty_input_has_no_clusters() {
        assert!(cluster_vectors(&[], 0.5).is_empty());
    }
}
