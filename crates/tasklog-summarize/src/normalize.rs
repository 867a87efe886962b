//! Task normalization.
//!
//! Turns stored [`TrackedTask`]s into [`ParsedTask`]s: trimmed title with a
//! fallback, trimmed description falling back to the title, and optional
//! whole-token abbreviation expansion on descriptions.

use regex::{NoExpand, Regex, RegexBuilder};
use tasklog_config::NormalizeConfig;
use tasklog_core::{ParsedTask, TrackedTask};

use crate::error::SummarizeError;

pub struct Normalizer {
    fallback_title: String,
    abbreviations: Vec<(Regex, String)>,
}

impl Normalizer {
    /// # Errors
    ///
    /// Returns [`SummarizeError::Pattern`] if an abbreviation cannot be
    /// compiled into a pattern.
    pub fn new(config: &NormalizeConfig) -> Result<Self, SummarizeError> {
        let abbreviations = if config.expand_abbreviations {
            config
                .abbreviations
                .iter()
                .filter(|(short, _)| !short.trim().is_empty())
                .map(|(short, long)| Ok((token_pattern(short.trim())?, long.clone())))
                .collect::<Result<Vec<_>, SummarizeError>>()?
        } else {
            Vec::new()
        };

        Ok(Self {
            fallback_title: config.fallback_title.clone(),
            abbreviations,
        })
    }

    #[must_use]
    pub fn normalize(&self, tasks: &[TrackedTask]) -> Vec<ParsedTask> {
        tasks.iter().map(|t| self.normalize_one(t)).collect()
    }

    #[must_use]
    pub fn normalize_one(&self, task: &TrackedTask) -> ParsedTask {
        let title = match task.title.trim() {
            "" => self.fallback_title.clone(),
            title => title.to_string(),
        };
        let description = match task.description.trim() {
            "" => title.clone(),
            description => self.expand_abbreviations(description),
        };
        ParsedTask::new(title, description)
    }

    /// Replace every configured abbreviation that appears as a whole token.
    #[must_use]
    pub fn expand_abbreviations(&self, text: &str) -> String {
        self.abbreviations
            .iter()
            .fold(text.to_string(), |acc, (pattern, expansion)| {
                pattern
                    .replace_all(&acc, NoExpand(expansion))
                    .into_owned()
            })
    }
}

/// Case-insensitive match of `token` not glued to surrounding word characters.
fn token_pattern(token: &str) -> Result<Regex, regex::Error> {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let start = if is_word(token.chars().next()) { r"\b" } else { "" };
    let end = if is_word(token.chars().last()) { r"\b" } else { "" };
    RegexBuilder::new(&format!("{start}{}{end}", regex::escape(token)))
        .case_insensitive(true)
        .build()
}
