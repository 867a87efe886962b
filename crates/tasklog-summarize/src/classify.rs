//! Title classification into the fixed category set.

use std::future::Future;

use tasklog_core::TitleCategory;
use tasklog_embeddings::{Embedder, LazyModel};

use crate::error::{SummarizeError, check_len};
use crate::prototype::{embed_centroids, nearest};

/// Maps each title to one [`TitleCategory`], in input order.
pub trait TitleClassifier: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the backing model cannot be loaded or run.
    fn classify(
        &self,
        titles: &[String],
    ) -> impl Future<Output = Result<Vec<TitleCategory>, SummarizeError>> + Send;
}

/// Example titles per category, indexed like [`TitleCategory::ALL`].
const CATEGORY_PROTOTYPES: &[&[&str]] = &[
    // valid_title
    &[
        "Sprint 10",
        "Release 2.4",
        "Payment service migration",
        "Login page redesign",
        "Customer onboarding flow",
        "Search indexing",
    ],
    // background_task
    &[
        "background task",
        "monitoring alerts",
        "waiting for build",
        "routine maintenance",
        "server checks",
    ],
    // meetings
    &[
        "meeting",
        "daily standup",
        "team sync",
        "client call",
        "retrospective",
        "one on one",
    ],
    // general_tasks
    &["general tasks", "misc", "other", "todo", "various things"],
    // general_activities
    &[
        "general activities",
        "emails",
        "admin work",
        "reading",
        "paperwork",
    ],
    // project_tasks
    &[
        "project tasks",
        "project work",
        "development",
        "coding",
        "implementation",
    ],
];

/// Nearest-centroid classifier over embedded example titles.
///
/// Centroids are computed on first use and kept for the life of the classifier.
pub struct PrototypeTitleClassifier<E> {
    embedder: E,
    centroids: LazyModel<Vec<Vec<f32>>>,
}

impl<E: Embedder> PrototypeTitleClassifier<E> {
    #[must_use]
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            centroids: LazyModel::new(),
        }
    }
}

impl<E: Embedder> TitleClassifier for PrototypeTitleClassifier<E> {
    async fn classify(&self, titles: &[String]) -> Result<Vec<TitleCategory>, SummarizeError> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }
        let centroids = self
            .centroids
            .get_or_load(|| embed_centroids(&self.embedder, CATEGORY_PROTOTYPES))
            .await?;

        let vectors = self.embedder.embed(titles).await?;
        check_len("embedder", titles.len(), vectors.len())?;

        vectors
            .iter()
            .map(|v| {
                TitleCategory::from_index(nearest(v, centroids))
                    .map_err(|e| SummarizeError::Classifier(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklog_embeddings::test_support::BagOfWords;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_prototype_list_per_category() {
        assert_eq!(CATEGORY_PROTOTYPES.len(), TitleCategory::ALL.len());
        assert!(CATEGORY_PROTOTYPES.iter().all(|p| !p.is_empty()));
    }

    #[tokio::test]
    async fn classifies_by_nearest_prototype() {
        let classifier = PrototypeTitleClassifier::new(BagOfWords::default());
        let titles: Vec<String> = ["Daily standup", "General Tasks", "Sprint 12"]
            .iter()
            .map(ToString::to_string)
            .collect();

        let categories = classifier.classify(&titles).await.unwrap();
        assert_eq!(
            categories,
            vec![
                TitleCategory::Meetings,
                TitleCategory::GeneralTasks,
                TitleCategory::ValidTitle
            ]
        );
    }

    #[tokio::test]
    async fn empty_input_skips_the_model() {
        let embedder = BagOfWords::default();
        let classifier = PrototypeTitleClassifier::new(&embedder);
        assert!(classifier.classify(&[]).await.unwrap().is_empty());
        assert_eq!(embedder.calls(), 0);
    }
}
