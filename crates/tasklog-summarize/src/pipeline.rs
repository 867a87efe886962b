//! The summarization orchestrator.
//!
//! [`Summarizer::summarize_with_progress`] runs the model-backed path:
//!
//! 1. model load, concurrently with normalization and work filtering
//! 2. title grouping (similarity or classifier strategy)
//! 3. description parsing with fragment merging
//! 4. global deduplication
//! 5. formatting
//!
//! Any service failure abandons that path as a whole and the title-only
//! fallback runs over the original input instead. Callers always get a
//! summary and never see partial model results.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tasklog_config::{GroupingStrategy, SummarizeConfig, TasklogConfig};
use tasklog_core::{SummaryGroup, TrackedTask};
use tasklog_embeddings::{Embedder, EmbeddingService, LoadState};

use crate::classify::{PrototypeTitleClassifier, TitleClassifier};
use crate::dedup::{dedupe, dedupe_exact};
use crate::error::SummarizeError;
use crate::filter::WorkFilter;
use crate::format::format_groups;
use crate::group::{
    group_by_classifier, group_by_normalized_title, group_by_similarity, parse_groups,
    parse_groups_plain,
};
use crate::normalize::Normalizer;
use crate::progress::{ProgressReporter, ProgressStage, progress_message};
use crate::validity::{ConfiguredValidator, SentenceValidator};

/// A summarizer wired to the shared fastembed service.
pub type DefaultSummarizer = Summarizer<
    Arc<EmbeddingService>,
    PrototypeTitleClassifier<Arc<EmbeddingService>>,
    ConfiguredValidator<Arc<EmbeddingService>>,
>;

pub struct Summarizer<E, C, V> {
    embedder: E,
    classifier: C,
    validator: V,
    normalizer: Normalizer,
    filter: WorkFilter,
    config: SummarizeConfig,
    stages: Vec<ProgressStage>,
}

impl DefaultSummarizer {
    /// Build a summarizer whose classifier and validator share one lazily
    /// loaded embedding service.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Pattern`] if an abbreviation is unusable.
    pub fn from_config(config: &TasklogConfig) -> Result<Self, SummarizeError> {
        let service = Arc::new(EmbeddingService::new(
            config.model.clone(),
            config.summarize.embed_chunk_size,
        ));
        Self::new(
            config,
            Arc::clone(&service),
            PrototypeTitleClassifier::new(Arc::clone(&service)),
            ConfiguredValidator::from_config(&config.summarize, service),
        )
    }
}

impl<E, C, V> Summarizer<E, C, V>
where
    E: Embedder,
    C: TitleClassifier,
    V: SentenceValidator,
{
    /// # Errors
    ///
    /// Returns [`SummarizeError::Pattern`] if an abbreviation is unusable.
    pub fn new(
        config: &TasklogConfig,
        embedder: E,
        classifier: C,
        validator: V,
    ) -> Result<Self, SummarizeError> {
        Ok(Self {
            embedder,
            classifier,
            validator,
            normalizer: Normalizer::new(&config.normalize)?,
            filter: WorkFilter::new(&config.filter),
            config: config.summarize.clone(),
            stages: config.progress.stages.clone(),
        })
    }

    /// Summarize with the configured similarity threshold and no progress.
    pub async fn summarize(&self, tasks: &[TrackedTask]) -> Vec<SummaryGroup> {
        self.summarize_with_progress(tasks, self.config.similarity_threshold, |_| {})
            .await
    }

    /// Summarize `tasks`, deduplicating work items above `threshold`.
    ///
    /// `on_progress` receives `"<message> (<percentage>%)"` for each stage
    /// reached. An empty task list gives an empty summary without touching
    /// the model or reporting progress.
    pub async fn summarize_with_progress(
        &self,
        tasks: &[TrackedTask],
        threshold: f32,
        mut on_progress: impl FnMut(&str) + Send,
    ) -> Vec<SummaryGroup> {
        if tasks.is_empty() {
            return Vec::new();
        }

        let progress = SharedProgress::new(self.stages.clone(), move |stage| {
            on_progress(&progress_message(stage));
        });
        progress.report("init");

        let summary = match self.enhanced(tasks, threshold, &progress).await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(%error, "summarization failed, falling back to title grouping");
                progress.report("finalizing");
                self.fallback(tasks)
            }
        };

        progress.report("done");
        tracing::debug!(groups = summary.len(), "summary complete");
        summary
    }

    async fn enhanced(
        &self,
        tasks: &[TrackedTask],
        threshold: f32,
        progress: &SharedProgress<'_>,
    ) -> Result<Vec<SummaryGroup>, SummarizeError> {
        let load = async {
            if self.embedder.state() == LoadState::Ready {
                progress.skip("loadingEmbeddingModel");
                Ok(())
            } else {
                progress.report("loadingEmbeddingModel");
                self.embedder.load().await
            }
        };
        let preprocess = async {
            progress.report("preprocess");
            let parsed = self.normalizer.normalize(tasks);
            progress.report("filterWorkTasks");
            self.filter.filter_work_tasks(parsed)
        };
        let (loaded, work) = tokio::join!(load, preprocess);
        loaded?;
        tokio::task::yield_now().await;

        progress.report("groupingTaskTitles");
        let title_groups = match self.config.strategy {
            GroupingStrategy::Similarity => {
                group_by_similarity(&work, &self.embedder, self.config.title_threshold).await?
            }
            GroupingStrategy::Classifier => group_by_classifier(&work, &self.classifier).await?,
        };
        tokio::task::yield_now().await;

        progress.report("parseTaskDescriptions");
        let parsed = parse_groups(&work, &title_groups, &self.validator).await?;
        tracing::debug!(
            groups = parsed.len(),
            items = parsed.item_count(),
            "parsed descriptions"
        );

        progress.report("removeSimilarDescriptions");
        let deduped = dedupe(parsed, &self.embedder, threshold, self.config.min_item_chars).await?;
        tokio::task::yield_now().await;

        progress.report("finalizing");
        Ok(format_groups(deduped))
    }

    /// Title-only summary: normalized-title groups, plain parsing, exact
    /// dedup. Needs no model.
    #[must_use]
    pub fn fallback(&self, tasks: &[TrackedTask]) -> Vec<SummaryGroup> {
        let work = self
            .filter
            .filter_work_tasks(self.normalizer.normalize(tasks));
        let groups = group_by_normalized_title(&work);
        format_groups(dedupe_exact(parse_groups_plain(&work, &groups)))
    }
}

/// A progress reporter shared by the concurrently polled pipeline branches.
struct SharedProgress<'a>(Mutex<ProgressReporter<'a>>);

impl<'a> SharedProgress<'a> {
    fn new(stages: Vec<ProgressStage>, callback: impl FnMut(&ProgressStage) + Send + 'a) -> Self {
        Self(Mutex::new(ProgressReporter::new(stages, callback)))
    }

    fn lock(&self) -> MutexGuard<'_, ProgressReporter<'a>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, name: &str) {
        self.lock().report(Some(name));
    }

    fn skip(&self, name: &str) {
        self.lock().skip(Some(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklog_embeddings::test_support::BagOfWords;
    use crate::validity::HeuristicSentenceValidator;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn task(id: &str, title: &str, description: &str) -> TrackedTask {
        let created = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
        TrackedTask::new(id, title, description, created)
    }

    fn summarizer(
        embedder: &BagOfWords,
    ) -> Summarizer<&BagOfWords, PrototypeTitleClassifier<&BagOfWords>, HeuristicSentenceValidator>
    {
        Summarizer::new(
            &TasklogConfig::default(),
            embedder,
            PrototypeTitleClassifier::new(embedder),
            HeuristicSentenceValidator::new(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn empty_input_reports_nothing() {
        let embedder = BagOfWords::default();
        let mut seen = Vec::new();
        let summary = summarizer(&embedder)
            .summarize_with_progress(&[], 0.7, |m| seen.push(m.to_string()))
            .await;
        assert!(summary.is_empty());
        assert!(seen.is_empty());
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn progress_rises_to_done() {
        let embedder = BagOfWords::default();
        let tasks = [
            task("1", "Sprint 10", "fix login bug"),
            task("2", "Code review", "review the pull request"),
        ];
        let mut seen = Vec::new();
        summarizer(&embedder)
            .summarize_with_progress(&tasks, 0.7, |m| seen.push(m.to_string()))
            .await;

        assert_eq!(
            seen,
            vec![
                "initializing (0%)",
                "preprocessing tasks (50%)",
                "filtering work tasks (55%)",
                "grouping tasks by title (60%)",
                "parsing task descriptions (65%)",
                "removing similar task descriptions (85%)",
                "format and sorting summary (90%)",
                "summary complete (100%)",
            ]
        );
    }

    #[test]
    fn fallback_groups_by_normalized_title() {
        let embedder = BagOfWords::default();
        let tasks = [
            task("1", "Sprint 10", "fix login bug, qa"),
            task("2", "sprint  10", "fix login bug"),
            task("3", "Lunch", "lunch break"),
        ];
        assert_eq!(
            summarizer(&embedder).fallback(&tasks),
            vec![SummaryGroup::new(
                "Sprint 10",
                vec!["fix login bug".to_string(), "qa".to_string()]
            )]
        );
    }
}
