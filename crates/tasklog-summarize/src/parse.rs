//! Description parsing.
//!
//! A description is free text holding several work items separated by
//! newlines and commas, often with bullets, status markers, and links mixed
//! in. Parsing has two pure halves, [`split_description`] and
//! [`merge_fragments`], glued together by the async [`parse_description`],
//! which asks a [`SentenceValidator`] which comma fragments stand alone.

use std::sync::LazyLock;

use regex::Regex;
use tasklog_core::WorkItem;

use crate::error::{SummarizeError, check_len};
use crate::validity::SentenceValidator;

static LEADING_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\p{L}\p{N}]+").expect("leading junk regex"));

static STATUS_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(done|in progress|completed|pending|todo|finished)\s*(->|-)\s*")
        .expect("status prefix regex")
});

static STATUS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(->|-|\()\s*(done|in progress|completed|pending|todo|finished)\s*\)?$")
        .expect("status suffix regex")
});

/// Strip bullets and status markers from one line.
///
/// Returns `None` when nothing is left or the line is a link.
#[must_use]
pub fn clean_line(line: &str) -> Option<String> {
    let line = LEADING_JUNK.replace(line.trim(), "");
    let line = STATUS_SUFFIX.replace(&line, "");
    let line = STATUS_PREFIX.replace(&line, "");
    let line = line.trim();

    if line.is_empty() || line.starts_with("http") {
        None
    } else {
        Some(line.to_string())
    }
}

/// Split a description into cleaned lines, each split into comma segments.
///
/// Lines with no surviving segment are dropped.
#[must_use]
pub fn split_description(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter_map(clean_line)
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|segments| !segments.is_empty())
        .collect()
}

/// Merge comma fragments given one validity flag per segment.
///
/// - all invalid: one comma-joined item
/// - invalid segments before the first valid one count as valid
/// - invalid segments after the last valid one are comma-joined onto it
#[must_use]
pub fn merge_fragments(mut segments: Vec<String>, valid: &[bool]) -> Vec<String> {
    if segments.len() <= 1 {
        return segments;
    }
    let Some(last_valid) = valid.iter().rposition(|v| *v) else {
        return vec![segments.join(", ")];
    };
    if last_valid + 1 >= segments.len() {
        return segments;
    }

    let tail = segments.split_off(last_valid).join(", ");
    segments.push(tail);
    segments
}

/// Parse a description into work items.
///
/// The merge pass runs once per line and then once more over the flattened
/// list. A single segment is never sent to the validator.
///
/// # Errors
///
/// Returns an error if the validator fails or answers with the wrong number
/// of flags.
pub async fn parse_description<V>(text: &str, validator: &V) -> Result<Vec<WorkItem>, SummarizeError>
where
    V: SentenceValidator,
{
    let mut items = Vec::new();
    for segments in split_description(text) {
        items.extend(merge_with(validator, segments).await?);
    }

    if items.is_empty() && !text.trim().is_empty() {
        items.push(text.trim().to_string());
    }

    merge_with(validator, items).await
}

/// Parse without the validator: every comma segment becomes an item.
#[must_use]
pub fn parse_description_plain(text: &str) -> Vec<WorkItem> {
    let mut items: Vec<WorkItem> = split_description(text).into_iter().flatten().collect();
    if items.is_empty() && !text.trim().is_empty() {
        items.push(text.trim().to_string());
    }
    items
}

async fn merge_with<V>(validator: &V, segments: Vec<String>) -> Result<Vec<String>, SummarizeError>
where
    V: SentenceValidator,
{
    if segments.len() <= 1 {
        return Ok(segments);
    }
    let flags = validator.validate(&segments).await?;
    check_len("sentence validator", segments.len(), flags.len())?;
    Ok(merge_fragments(segments, &flags))
}
