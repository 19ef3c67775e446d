//! Whitespace cleaning policies

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").expect("valid regex"));

/// Cleaning flags
///
/// `remove_all_whitespace` wins over everything, then `trim_only`. The other
/// flags compose. `remove_extra_spaces` and `convert_to_single_space` are
/// equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    pub trim_only: bool,
    pub remove_line_breaks: bool,
    pub remove_extra_spaces: bool,
    pub remove_tabs: bool,
    pub convert_to_single_space: bool,
    pub remove_all_whitespace: bool,
}

impl CleaningOptions {
    /// Trim leading and trailing whitespace only
    pub fn trim_only() -> Self {
        Self {
            trim_only: true,
            ..Default::default()
        }
    }

    /// Strip every whitespace character
    pub fn compact() -> Self {
        Self {
            remove_all_whitespace: true,
            ..Default::default()
        }
    }

    /// Fold everything onto one line with single spaces
    pub fn single_line() -> Self {
        Self {
            remove_line_breaks: true,
            remove_extra_spaces: true,
            remove_tabs: true,
            ..Default::default()
        }
    }

    /// The cleaner's out-of-the-box configuration
    pub fn standard() -> Self {
        Self {
            remove_extra_spaces: true,
            remove_tabs: true,
            ..Default::default()
        }
    }
}

/// Apply `options` to `text`
pub fn clean(text: &str, options: &CleaningOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    if options.remove_all_whitespace {
        return remove_all_whitespace(text);
    }

    if options.trim_only {
        return trim_only(text);
    }

    let mut result = text.to_string();

    if options.remove_tabs {
        result = result.replace('\t', " ");
    }

    if options.remove_line_breaks {
        result = LINE_BREAK.replace_all(&result, " ").into_owned();
    }

    if options.remove_extra_spaces || options.convert_to_single_space {
        result = WHITESPACE_RUN.replace_all(&result, " ").into_owned();
    }

    result.trim().to_string()
}

pub fn trim_only(text: &str) -> String {
    text.trim().to_string()
}

pub fn remove_line_breaks(text: &str) -> String {
    LINE_BREAK.replace_all(text, " ").trim().to_string()
}

pub fn remove_extra_spaces(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

pub fn remove_tabs(text: &str) -> String {
    text.replace('\t', " ").trim().to_string()
}

pub fn remove_all_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
