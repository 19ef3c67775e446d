//! Pieces shared by the reversible URL and Base64 tools.

use crate::prelude::*;
use colored::Colorize;
use devkit_core::detect::EncodingMode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Encode plain text
    Encode,
    /// Decode encoded text
    Decode,
}

impl From<Direction> for EncodingMode {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Encode => EncodingMode::Encode,
            Direction::Decode => EncodingMode::Decode,
        }
    }
}

/// Result of a URL or Base64 run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecOutput {
    pub mode: EncodingMode,
    /// The mode came from input detection rather than `--mode`
    pub auto_detected: bool,
    pub output: String,
}

impl CodecOutput {
    pub fn empty(mode: EncodingMode) -> Self {
        Self {
            mode,
            auto_detected: false,
            output: String::new(),
        }
    }
}

/// Human-facing rendering: a short header on TTYs, then the raw output
pub fn format_codec_text(tool: &str, output: &CodecOutput, decorate: bool) -> String {
    if !decorate {
        return output.output.clone();
    }

    let mode = output.mode.to_string().to_uppercase();
    let detected = if output.auto_detected {
        f!(" {}", "(auto-detected)".bright_black())
    } else {
        String::new()
    };

    f!(
        "{} {}{}\n{}",
        tool.bright_cyan().bold(),
        mode.yellow(),
        detected,
        output.output
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_codec_text_plain() {
        let output = CodecOutput {
            mode: EncodingMode::Decode,
            auto_detected: true,
            output: "hello world".to_string(),
        };
        assert_eq!(format_codec_text("URL", &output, false), "hello world");
    }

    #[test]
    fn test_format_codec_text_decorated_contains_mode() {
        colored::control::set_override(false);
        let output = CodecOutput {
            mode: EncodingMode::Encode,
            auto_detected: true,
            output: "a%20b".to_string(),
        };
        assert_eq!(
            format_codec_text("URL", &output, true),
            "URL ENCODE (auto-detected)\na%20b"
        );
    }
}
