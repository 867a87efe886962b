//! Task normalization configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_fallback_title() -> String {
    String::from("General Tasks")
}

const fn default_expand() -> bool {
    true
}

fn default_abbreviations() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("pr".to_string(), "pull request".to_string()),
        ("self-explore".to_string(), "self explore".to_string()),
    ])
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizeConfig {
    /// Title given to tasks whose title is blank.
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Whether descriptions get abbreviation expansion.
    #[serde(default = "default_expand")]
    pub expand_abbreviations: bool,

    /// Whole-token, case-insensitive replacements (`abbreviation -> expansion`).
    #[serde(default = "default_abbreviations")]
    pub abbreviations: BTreeMap<String, String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            fallback_title: default_fallback_title(),
            expand_abbreviations: default_expand(),
            abbreviations: default_abbreviations(),
        }
    }
}
