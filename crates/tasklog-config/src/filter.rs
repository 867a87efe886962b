//! Work/non-work keyword lists for the work filter.
//!
//! Both lists are plain data so they can be tuned from `config.toml`
//! without touching the filter logic.

use serde::{Deserialize, Serialize};

const WORK_INDICATORS: &[&str] = &[
    // development
    "code",
    "coding",
    "programming",
    "development",
    "dev",
    "bug",
    "fix",
    "issue",
    "feature",
    "implement",
    "review",
    "test",
    "testing",
    "debug",
    "deploy",
    // project
    "sprint",
    "project",
    "task",
    "ticket",
    "work",
    "meeting",
    "standup",
    "sync",
    "call",
    "client",
    // research and planning
    "research",
    "analysis",
    "design",
    "plan",
    "architecture",
];

const NON_WORK_KEYWORDS: &[&str] = &[
    // breaks and meals
    "break",
    "lunch",
    "dinner",
    "breakfast",
    "eat",
    "meal",
    "snack",
    "coffee",
    // personal education
    "english",
    "class",
    "course",
    "lesson",
    "study",
    "learning",
    "training",
    "workshop",
    "seminar",
    "conference",
    // personal
    "personal",
    "doctor",
    "appointment",
    "dentist",
    "medical",
    // time off
    "vacation",
    "holiday",
    "off",
    "sick",
    "leave",
    // exercise
    "gym",
    "exercise",
    "workout",
    "fitness",
    "yoga",
    // social
    "party",
    "social",
    "hangout",
    "fun",
    // commute
    "commute",
    "travel",
    "driving",
    // errands
    "shopping",
    "groceries",
    "cleaning",
    "laundry",
    "errands",
    // family
    "family",
    "kids",
    "children",
    "spouse",
    "date",
];

fn default_work_indicators() -> Vec<String> {
    WORK_INDICATORS.iter().map(ToString::to_string).collect()
}

fn default_non_work_keywords() -> Vec<String> {
    NON_WORK_KEYWORDS.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Any match keeps the task, regardless of non-work matches.
    #[serde(default = "default_work_indicators")]
    pub work_indicators: Vec<String>,

    /// Any match drops the task when no work indicator matched.
    #[serde(default = "default_non_work_keywords")]
    pub non_work_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            work_indicators: default_work_indicators(),
            non_work_keywords: default_non_work_keywords(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_are_lowercase_and_non_empty() {
        let config = FilterConfig::default();
        assert_eq!(config.work_indicators.len(), WORK_INDICATORS.len());
        assert_eq!(config.non_work_keywords.len(), NON_WORK_KEYWORDS.len());
        for keyword in config.work_indicators.iter().chain(&config.non_work_keywords) {
            assert!(!keyword.is_empty());
            assert_eq!(keyword, &keyword.to_lowercase());
        }
    }
}
