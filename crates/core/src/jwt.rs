//! Structural JWT decoding with advisory claim checks
//!
//! Nothing here verifies a signature: the signature segment is passed through
//! untouched. The current time is a parameter so decoding stays deterministic.

use crate::error::{Error, Result};
use crate::text::LENIENT_STANDARD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SEGMENT_COUNT_ERROR: &str = "JWT must have exactly 3 parts separated by dots";
const CONTENT_ERROR: &str = "Failed to parse JWT content: Invalid Base64 or JSON format";

/// The three segments of a compact JWT plus the decoded header and payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtParts {
    pub header: String,
    pub payload: String,
    pub signature: String,
    pub header_decoded: Value,
    pub payload_decoded: Value,
}

/// Outcome of [`decode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtDecodeResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<JwtParts>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A registered time claim rendered for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimTimestamp {
    pub claim: String,
    pub timestamp: i64,
    pub formatted: String,
}

/// Decode `token` and collect advisory warnings relative to `now`
pub fn decode(token: &str, now: DateTime<Utc>) -> JwtDecodeResult {
    match decode_parts(token) {
        Ok(parts) => {
            let warnings = validate_claims(&parts.header_decoded, &parts.payload_decoded, now);
            JwtDecodeResult {
                is_valid: true,
                parts: Some(parts),
                warnings,
                error: None,
            }
        }
        Err(err) => JwtDecodeResult {
            is_valid: false,
            parts: None,
            warnings: Vec::new(),
            error: Some(match err {
                Error::InvalidInput(msg) => msg,
                other => other.to_string(),
            }),
        },
    }
}

/// Split and decode a token without evaluating any claims
pub fn decode_parts(token: &str) -> Result<JwtParts> {
    if token.trim().is_empty() {
        return Err(Error::invalid("Token is empty"));
    }

    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(Error::invalid(SEGMENT_COUNT_ERROR));
    };

    if let Some(position) = segments.iter().position(|segment| segment.is_empty()) {
        return Err(Error::invalid(format!(
            "{SEGMENT_COUNT_ERROR} (part {} is empty)",
            position + 1
        )));
    }

    let header_decoded = decode_segment(header)?;
    let payload_decoded = decode_segment(payload)?;

    Ok(JwtParts {
        header: header.to_string(),
        payload: payload.to_string(),
        signature: signature.to_string(),
        header_decoded,
        payload_decoded,
    })
}

/// Decode a base64url segment, restoring padding first
pub fn decode_base64url(segment: &str) -> Result<Vec<u8>> {
    let mut standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    let remainder = standard.len() % 4;
    if remainder != 0 {
        standard.push_str(&"=".repeat(4 - remainder));
    }

    LENIENT_STANDARD
        .decode(standard)
        .map_err(|_| Error::invalid(CONTENT_ERROR))
}

/// Header and payload must both decode to a JSON object.
fn decode_segment(segment: &str) -> Result<Value> {
    let bytes = decode_base64url(segment)?;
    match serde_json::from_slice(&bytes) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(Error::invalid(CONTENT_ERROR)),
    }
}

/// Advisory warnings: expiration first, then `nbf`, then the algorithm
pub fn validate_claims(header: &Value, payload: &Value, now: DateTime<Utc>) -> Vec<String> {
    let mut warnings = Vec::new();

    match numeric_claim(payload, "exp") {
        Some(exp) => {
            let expires_at = timestamp_to_datetime(exp);
            if expires_at < now {
                warnings.push(format!("Token expired on {}", format_datetime(expires_at)));
            } else {
                warnings.push(format!(
                    "Token expires in {}",
                    format_remaining(expires_at - now)
                ));
            }
        }
        None => warnings.push("Token has no expiration date (exp)".to_string()),
    }

    if let Some(nbf) = numeric_claim(payload, "nbf") {
        let not_before = timestamp_to_datetime(nbf);
        if not_before > now {
            warnings.push(format!(
                "Token not valid until {} (nbf)",
                format_datetime(not_before)
            ));
        }
    }

    match header.get("alg").and_then(Value::as_str) {
        Some("none") => warnings.push("Token uses 'none' algorithm (not secure)".to_string()),
        Some("HS256") => warnings.push(
            "Token uses HS256 algorithm (cannot verify signature without secret)".to_string(),
        ),
        _ => {}
    }

    warnings
}

/// `iat`, `nbf` and `exp` claims present in `payload`, formatted for display
pub fn claim_timestamps(payload: &Value) -> Vec<ClaimTimestamp> {
    ["iat", "nbf", "exp"]
        .into_iter()
        .filter_map(|claim| {
            numeric_claim(payload, claim).map(|seconds| {
                let timestamp = seconds.floor() as i64;
                ClaimTimestamp {
                    claim: claim.to_string(),
                    timestamp,
                    formatted: format_timestamp(timestamp),
                }
            })
        })
        .collect()
}

/// Render seconds since the epoch as `YYYY-MM-DD HH:MM:SS UTC`
pub fn format_timestamp(seconds: i64) -> String {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(datetime) => format_datetime(datetime),
        None => format!("{seconds} (out of range)"),
    }
}

/// A claim counts only when it is a non-zero number, or a string holding one.
fn numeric_claim(payload: &Value, claim: &str) -> Option<f64> {
    let value = match payload.get(claim)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|value| value.is_finite() && *value != 0.0)
}

fn timestamp_to_datetime(seconds: f64) -> DateTime<Utc> {
    let millis = (seconds * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(if millis > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

fn format_datetime(datetime: DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn format_remaining(remaining: chrono::TimeDelta) -> String {
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
