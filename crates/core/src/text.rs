//! Reversible text transforms: URL percent-encoding, Base64 and JSON.

use crate::detect::BASE64_ALPHABET;
use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::{general_purpose::GeneralPurposeConfig, GeneralPurpose};
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::sync::LazyLock;

/// Standard padded alphabet that tolerates non-zero trailing bits, like a
/// browser's `atob`.
pub(crate) const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)//.*$").expect("valid regex"));

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

// ============================================================================
// URL
// ============================================================================

/// Characters URI component encoding leaves untouched besides alphanumerics
const URL_UNRESERVED: &[u8] = b"-_.!~*'()";

/// Percent-encode `text` as a URI component
///
/// Every UTF-8 byte outside the unreserved set is written as `%XX` with
/// uppercase hex digits.
pub fn encode_url(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());

    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || URL_UNRESERVED.contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    encoded
}

/// Decode a percent-encoded URI component
///
/// Fails on truncated or non-hex escapes and on escapes that do not form
/// valid UTF-8.
pub fn decode_url(text: &str) -> Result<String> {
    validate_percent_escapes(text)?;

    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::invalid(format!("URI malformed: {e}")))
}

fn validate_percent_escapes(text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                Some(_) => {
                    return Err(Error::invalid(format!(
                        "URI malformed: invalid escape sequence at position {i}"
                    )))
                }
                None => {
                    return Err(Error::invalid(format!(
                        "URI malformed: truncated escape sequence at position {i}"
                    )))
                }
            }
        } else {
            i += 1;
        }
    }

    Ok(())
}

// ============================================================================
// Base64
// ============================================================================

/// Encode the UTF-8 bytes of `text` as standard padded Base64
pub fn encode_base64(text: &str) -> String {
    encode_base64_bytes(text.as_bytes())
}

/// Encode raw bytes (e.g. a binary file) as standard padded Base64
pub fn encode_base64_bytes(bytes: &[u8]) -> String {
    LENIENT_STANDARD.encode(bytes)
}

/// Decode standard Base64 into UTF-8 text
///
/// The input is validated against the alphabet and the 4-character block
/// length before decoding so malformed input is rejected instead of being
/// silently truncated.
pub fn decode_base64(text: &str) -> Result<String> {
    if !BASE64_ALPHABET.is_match(text) || text.len() % 4 != 0 {
        return Err(Error::invalid("Invalid Base64 string"));
    }

    let bytes = LENIENT_STANDARD
        .decode(text)
        .map_err(|e| Error::invalid(format!("Invalid Base64 string: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|_| Error::invalid("Decoded Base64 data is not valid UTF-8 text"))
}

// ============================================================================
// JSON
// ============================================================================

/// Documents nested deeper than this are rejected before parsing
pub const MAX_JSON_DEPTH: usize = 512;

/// Indentation wider than ten spaces is clamped to ten
pub const MAX_INDENT: usize = 10;

/// Options for [`format_json`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFormatOptions {
    /// Spaces per indentation level; `0` renders on a single line
    pub indent: usize,
    /// Sort object keys lexicographically
    pub sort_keys: bool,
    /// Strip `//` and `/* */` comments before parsing
    pub strip_comments: bool,
}

impl Default for JsonFormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: false,
            strip_comments: false,
        }
    }
}

/// Outcome of [`validate_json`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Size summary of a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub lines: usize,
}

/// Pretty-print a JSON document
///
/// Comment stripping is purely textual: it does not know about string
/// literals, so a `//` or `/*` inside a string value is removed as well.
pub fn format_json(text: &str, options: &JsonFormatOptions) -> Result<String> {
    let source = if options.strip_comments {
        strip_json_comments(text)
    } else {
        text.to_string()
    };

    let mut value = normalize_numbers(parse_json(&source)?);
    if options.sort_keys {
        value = sort_object_keys(value);
    }

    if options.indent == 0 {
        return to_compact_string(&value);
    }

    let indent = " ".repeat(options.indent.min(MAX_INDENT));
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::invalid(format!("JSON serialization failed: {e}")))?;

    String::from_utf8(buffer).map_err(|e| Error::invalid(format!("JSON serialization failed: {e}")))
}

/// Re-serialize a JSON document without insignificant whitespace
pub fn minify_json(text: &str) -> Result<String> {
    let value = normalize_numbers(parse_json(text)?);
    to_compact_string(&value)
}

/// Check whether `text` parses as JSON, reporting the parser's diagnostic
///
/// Numbers outside the range of a double are accepted, and nesting is
/// allowed up to [`MAX_JSON_DEPTH`] levels.
pub fn validate_json(text: &str) -> JsonValidation {
    match parse_value(text) {
        Ok(_) => JsonValidation {
            is_valid: true,
            error: None,
        },
        Err(e) => JsonValidation {
            is_valid: false,
            error: Some(e),
        },
    }
}

/// Remove `//` line comments, then `/* */` block comments
pub fn strip_json_comments(text: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(text, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}

/// Sort object keys recursively through nested objects
///
/// Arrays are returned as they are, including any objects they contain.
pub fn sort_object_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_object_keys(value)))
                    .collect(),
            )
        }
        other => other,
    }
}

/// Character and line counts of a rendered document
pub fn text_stats(output: &str) -> TextStats {
    TextStats {
        characters: output.chars().count(),
        lines: output.split('\n').count(),
    }
}

fn parse_json(text: &str) -> Result<Value> {
    parse_value(text).map_err(Error::InvalidInput)
}

fn parse_value(text: &str) -> std::result::Result<Value, String> {
    let depth = nesting_depth(text);
    if depth > MAX_JSON_DEPTH {
        return Err(format!(
            "nesting depth {depth} exceeds the limit of {MAX_JSON_DEPTH} levels"
        ));
    }

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer).map_err(|e| e.to_string())?;
    deserializer.end().map_err(|e| e.to_string())?;

    Ok(value)
}

/// Deepest `[`/`{` nesting outside string literals
fn nesting_depth(text: &str) -> usize {
    let (mut depth, mut deepest) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

/// Rewrite every number in its shortest canonical form
///
/// Integral values lose their fraction (`1.0` becomes `1`), large and small
/// magnitudes use a signed exponent (`1e+21`, `1e-7`), and values that
/// overflow a double become `null`.
pub fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(number) => normalize_number(&number),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}

fn normalize_number(number: &Number) -> Value {
    let Some(float) = number.as_f64().filter(|float| float.is_finite()) else {
        return Value::Null;
    };

    canonical_number(float)
        .parse::<Number>()
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Shortest round-trip decimal with the exponent threshold at 1e21 and 1e-7
fn canonical_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let count = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let body = if count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        format!("{first}{fraction}e{exponent_sign}{}", exponent.unsigned_abs())
    };

    format!("{sign}{body}")
}

fn to_compact_string(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::invalid(format!("JSON serialization failed: {e}")))
}
