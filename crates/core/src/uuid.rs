//! UUID display formats and the template-based v4 fallback

use rand::Rng;
use serde::{Deserialize, Serialize};

const V4_TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";

/// Largest batch the generator produces in one call
pub const MAX_BATCH_SIZE: usize = 50;

/// Display format for a generated UUID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UuidFormat {
    #[default]
    Standard,
    NoHyphens,
    Braces,
    Uppercase,
}

/// Build a v4 UUID by filling the canonical template from `rng`
///
/// Used when the operating system's random source is unavailable. `x` digits
/// are uniform nibbles; the `y` digit carries the RFC 4122 variant bits.
pub fn fallback_v4<R: Rng>(rng: &mut R) -> String {
    V4_TEMPLATE
        .chars()
        .map(|c| match c {
            'x' => hex_digit(rng.gen_range(0..16)),
            'y' => hex_digit((rng.gen_range(0..16) & 0x3) | 0x8),
            other => other,
        })
        .collect()
}

fn hex_digit(nibble: u32) -> char {
    char::from_digit(nibble, 16).unwrap_or('0')
}

/// Render a canonical lowercase hyphenated UUID in `format`
pub fn format_uuid(raw: &str, format: UuidFormat) -> String {
    match format {
        UuidFormat::Standard => raw.to_string(),
        UuidFormat::NoHyphens => raw.replace('-', ""),
        UuidFormat::Braces => format!("{{{raw}}}"),
        UuidFormat::Uppercase => raw.to_uppercase(),
    }
}

/// Recover the canonical form from any [`UuidFormat`] rendering
pub fn normalize_uuid(formatted: &str) -> String {
    let unbraced = formatted.strip_prefix('{').unwrap_or(formatted);
    let unbraced = unbraced.strip_suffix('}').unwrap_or(unbraced);
    let lower = unbraced.to_lowercase();

    if !lower.contains('-') && lower.len() == 32 && lower.is_ascii() {
        format!(
            "{}-{}-{}-{}-{}",
            &lower[0..8],
            &lower[8..12],
            &lower[12..16],
            &lower[16..20],
            &lower[20..32]
        )
    } else {
        lower
    }
}
