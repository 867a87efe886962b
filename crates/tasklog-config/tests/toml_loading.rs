//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tasklog_config::{
    ConfigError, EmbeddingModelKind, GroupingStrategy, TasklogConfig, ValidatorKind,
};

fn base() -> Figment {
    Figment::from(Serialized::defaults(TasklogConfig::default()))
}

#[test]
fn loads_summarize_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[summarize]
similarity_threshold = 0.8
title_threshold = 0.85
strategy = "classifier"
validator = "prototype"
min_item_chars = 2
embed_chunk_size = 8
"#,
        )?;

        let config: TasklogConfig = base().merge(Toml::file("config.toml")).extract()?;

        assert!((config.summarize.similarity_threshold - 0.8).abs() < f32::EPSILON);
        assert!((config.summarize.title_threshold - 0.85).abs() < f32::EPSILON);
        assert_eq!(config.summarize.strategy, GroupingStrategy::Classifier);
        assert_eq!(config.summarize.validator, ValidatorKind::Prototype);
        assert_eq!(config.summarize.min_item_chars, 2);
        assert_eq!(config.summarize.embed_chunk_size, 8);
        Ok(())
    });
}

#[test]
fn toml_keyword_list_replaces_default() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[filter]
non_work_keywords = ["nap", "lunch"]
"#,
        )?;

        let config: TasklogConfig = base().merge(Toml::file("config.toml")).extract()?;

        assert_eq!(config.filter.non_work_keywords, vec!["nap", "lunch"]);
        // untouched list keeps its defaults
        assert!(config.filter.work_indicators.contains(&"sprint".to_string()));
        Ok(())
    });
}

#[test]
fn loads_abbreviations_and_stages() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[normalize]
fallback_title = "Misc"

[normalize.abbreviations]
qa = "quality assurance"

[[progress.stages]]
name = "start"
message = "starting"
percentage = 0

[[progress.stages]]
name = "end"
message = "finished"
percentage = 100

[model]
embedding_model = "bge_small_en_v15"
cache_dir = "/tmp/tasklog-models"
"#,
        )?;

        let config: TasklogConfig = base().merge(Toml::file("config.toml")).extract()?;

        assert_eq!(config.normalize.fallback_title, "Misc");
        assert_eq!(
            config.normalize.abbreviations.get("qa").map(String::as_str),
            Some("quality assurance")
        );
        let names: Vec<_> = config.progress.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["start", "end"]);
        assert_eq!(config.model.embedding_model, EmbeddingModelKind::BgeSmallEnV15);
        assert_eq!(config.model.cache_dir, "/tmp/tasklog-models");
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKLOG_SUMMARIZE__SIMILARITY_THRESHOLD", "0.6");

        jail.create_file(
            "config.toml",
            r#"
[summarize]
similarity_threshold = 0.8
min_item_chars = 1
"#,
        )?;

        let config: TasklogConfig = base()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TASKLOG_").split("__"))
            .extract()?;

        assert!((config.summarize.similarity_threshold - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.summarize.min_item_chars, 1);
        Ok(())
    });
}

#[test]
fn load_from_file_validates_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bad.toml",
            r#"
[summarize]
title_threshold = 3.0
"#,
        )?;

        let result = TasklogConfig::load_from_file("bad.toml");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tasklog")?;
        jail.create_file(
            ".tasklog/config.toml",
            r#"
[store]
tasks_path = "custom/tasks.jsonl"
"#,
        )?;

        let config = TasklogConfig::load().expect("config loads");
        assert_eq!(config.store.tasks_path, "custom/tasks.jsonl");
        Ok(())
    });
}

/// Typo'd env var keys are silently ignored by figment; the default stays.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("TASKLOG_SUMMARIZE__SIMILARITY_THRESHOLDD", "0.1");

        let config: TasklogConfig = base()
            .merge(Env::prefixed("TASKLOG_").split("__"))
            .extract()?;

        assert!((config.summarize.similarity_threshold - 0.7).abs() < f32::EPSILON);
        Ok(())
    });
}
