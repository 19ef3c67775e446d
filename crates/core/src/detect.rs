//! Mode and case detection heuristics
//!
//! These classifiers pick a sensible default for the tools. They are lossy by
//! nature and never authoritative: the caller can always override the result.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URL_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").expect("valid regex"));

pub(crate) static BASE64_ALPHABET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").expect("valid regex"));

/// Ordered case patterns. The first match wins.
static CASE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("camelCase", r"^[a-z]+([A-Z][a-z]*)*$"),
        ("PascalCase", r"^[A-Z][a-z]*([A-Z][a-z]*)*$"),
        ("snake_case", r"^[a-z]+(_[a-z]+)*$"),
        ("kebab-case", r"^[a-z]+(-[a-z]+)*$"),
        ("UPPER_CASE", r"^[A-Z]+(_[A-Z]+)*$"),
        ("lowercase", r"^[a-z\s]+$"),
        ("UPPERCASE", r"^[A-Z\s]+$"),
        ("Title Case", r"^[A-Z][a-z]*(\s[A-Z][a-z]*)*$"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// Direction of a reversible transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    Encode,
    Decode,
}

impl std::fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingMode::Encode => write!(f, "encode"),
            EncodingMode::Decode => write!(f, "decode"),
        }
    }
}

/// Guess whether `text` is percent-encoded
///
/// Escape sequences take priority. Plain text without spaces still defaults
/// to `Encode` even when encoding it would be a no-op.
pub fn detect_url_encoding(text: &str) -> EncodingMode {
    if text.is_empty() {
        return EncodingMode::Encode;
    }

    if URL_ESCAPE.is_match(text) {
        EncodingMode::Decode
    } else {
        EncodingMode::Encode
    }
}

/// Guess whether `text` is a Base64 payload
///
/// Requires the standard alphabet, a length that is a multiple of 4, and more
/// than 4 characters so short words like `test` are not taken for Base64.
pub fn detect_base64(text: &str) -> EncodingMode {
    if text.is_empty() {
        return EncodingMode::Encode;
    }

    let looks_like_base64 =
        BASE64_ALPHABET.is_match(text) && text.len() % 4 == 0 && text.len() > 4;

    if looks_like_base64 {
        EncodingMode::Decode
    } else {
        EncodingMode::Encode
    }
}

/// Name of the case convention `text` appears to follow, or `""`
pub fn detect_text_case(text: &str) -> &'static str {
    if text.is_empty() {
        return "";
    }

    CASE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(name, _)| *name)
        .unwrap_or("")
}
