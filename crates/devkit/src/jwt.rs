use crate::input::InputArgs;
use crate::prelude::{eprintln, println, *};
use chrono::{DateTime, Utc};
use colored::Colorize;
use devkit_core::jwt::{claim_timestamps, decode, ClaimTimestamp, JwtDecodeResult};
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub struct JwtOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Decoded token plus the time claims rendered for display
#[derive(Debug, Clone, Serialize)]
pub struct JwtOutput {
    #[serde(flatten)]
    pub result: JwtDecodeResult,
    pub claims: Vec<ClaimTimestamp>,
}

pub async fn run(options: JwtOptions, global: crate::Global) -> Result<()> {
    let token = options.input.read_text()?;
    let output = jwt_data(token.trim(), Utc::now());

    if global.verbose {
        eprintln!(
            "Token length: {} (valid: {}, warnings: {})",
            token.trim().len(),
            output.result.is_valid,
            output.result.warnings.len()
        );
    }

    if options.json {
        println!("{}", to_json(&output)?);
    } else if let Some(error) = &output.result.error {
        return Err(eyre!("{}", error));
    } else {
        println!("{}", format_jwt_text(&output));
    }

    if let Some(parts) = &output.result.parts {
        let payload = serde_json::to_string_pretty(&parts.payload_decoded)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        crate::clipboard::copy_if_requested(&global, &payload, "Payload");
    }

    Ok(())
}

/// Decode `token` against `now`, attaching the formatted time claims
pub fn jwt_data(token: &str, now: DateTime<Utc>) -> JwtOutput {
    let result = decode(token, now);
    let claims = result
        .parts
        .as_ref()
        .map(|parts| claim_timestamps(&parts.payload_decoded))
        .unwrap_or_default();

    log::debug!(
        "decoded jwt: valid={} warnings={}",
        result.is_valid,
        result.warnings.len()
    );

    JwtOutput { result, claims }
}

/// Header, payload, signature, claims and warnings as sections
pub fn format_jwt_text(output: &JwtOutput) -> String {
    let Some(parts) = &output.result.parts else {
        return output.result.error.clone().unwrap_or_default();
    };

    let mut text = String::new();

    let pretty = |value: &serde_json::Value| {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    };

    text.push_str(&f!("{}\n", "Header".bright_cyan().bold()));
    text.push_str(&f!("{}\n\n", pretty(&parts.header_decoded)));
    text.push_str(&f!("{}\n", "Payload".bright_cyan().bold()));
    text.push_str(&f!("{}\n\n", pretty(&parts.payload_decoded)));
    text.push_str(&f!("{}\n", "Signature".bright_cyan().bold()));
    text.push_str(&parts.signature);

    if !output.claims.is_empty() {
        text.push_str(&f!("\n\n{}", "Claims".bright_cyan().bold()));
        for claim in &output.claims {
            text.push_str(&f!(
                "\n{}: {} ({})",
                claim.claim.green(),
                claim.formatted,
                claim.timestamp
            ));
        }
    }

    if !output.result.warnings.is_empty() {
        text.push_str(&f!("\n\n{}", "Warnings".yellow().bold()));
        for warning in &output.result.warnings {
            text.push_str(&f!("\n- {}", warning.yellow()));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // {"alg":"HS256","typ":"JWT"} . {"sub":"1234567890","name":"John Doe","iat":1516239022}
    const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
        eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
        SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_jwt_data_valid_token() {
        let output = jwt_data(TOKEN, now());
        assert!(output.result.is_valid);
        assert_eq!(output.claims.len(), 1);
        assert_eq!(output.claims[0].claim, "iat");
        assert_eq!(output.claims[0].formatted, "2018-01-18 01:30:22 UTC");
    }

    #[test]
    fn test_jwt_data_invalid_token_has_no_claims() {
        let output = jwt_data("a.b", now());
        assert!(!output.result.is_valid);
        assert!(output.claims.is_empty());
    }

    #[test]
    fn test_format_jwt_text_sections() {
        colored::control::set_override(false);
        let text = format_jwt_text(&jwt_data(TOKEN, now()));

        assert!(text.starts_with("Header\n{\n  \"alg\": \"HS256\""));
        assert!(text.contains("Payload\n{\n  \"sub\": \"1234567890\""));
        assert!(text.contains("Signature\nSflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"));
        assert!(text.contains("iat: 2018-01-18 01:30:22 UTC (1516239022)"));
        assert!(text.contains("- Token has no expiration date (exp)"));
    }

    #[test]
    fn test_format_jwt_text_invalid_shows_error() {
        let text = format_jwt_text(&jwt_data("", now()));
        assert_eq!(text, "Token is empty");
    }

    #[test]
    fn test_jwt_output_json_flattens_result() {
        let value = serde_json::to_value(jwt_data(TOKEN, now())).unwrap();
        assert_eq!(value["is_valid"], true);
        assert_eq!(value["parts"]["header_decoded"]["alg"], "HS256");
        assert_eq!(value["claims"][0]["timestamp"], 1516239022);
    }
}
