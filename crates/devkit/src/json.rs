use crate::input::InputArgs;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::text::{
    format_json, minify_json, strip_json_comments, text_stats, validate_json, JsonFormatOptions,
    JsonValidation, TextStats,
};
use serde::Serialize;

#[derive(Debug, Clone, clap::Args)]
pub struct JsonOptions {
    #[clap(flatten)]
    pub input: InputArgs,

    /// Print on a single line
    #[arg(long, conflicts_with = "validate")]
    pub minify: bool,

    /// Only check that the input parses
    #[arg(long)]
    pub validate: bool,

    /// Spaces per indentation level (0 prints on a single line)
    #[arg(long, env = "DEVKIT_JSON_INDENT", default_value_t = 2)]
    pub indent: usize,

    /// Sort object keys recursively
    #[arg(long)]
    pub sort_keys: bool,

    /// Remove `//` and `/* */` comments before parsing
    #[arg(long)]
    pub strip_comments: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// What `devkit json` should do with the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonAction {
    Format,
    Minify,
    Validate,
}

impl From<&JsonOptions> for JsonAction {
    fn from(options: &JsonOptions) -> Self {
        if options.validate {
            JsonAction::Validate
        } else if options.minify {
            JsonAction::Minify
        } else {
            JsonAction::Format
        }
    }
}

/// Result of a `devkit json` run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonOutput {
    pub action: JsonAction,
    pub validation: JsonValidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TextStats>,
}

pub async fn run(options: JsonOptions, global: crate::Global) -> Result<()> {
    let text = options.input.read_text()?;
    let action = JsonAction::from(&options);
    let format_options = JsonFormatOptions {
        indent: options.indent,
        sort_keys: options.sort_keys,
        strip_comments: options.strip_comments,
    };

    if global.verbose {
        eprintln!("Action: {:?} ({:?})", action, format_options);
    }

    let output = json_data(&text, action, &format_options);

    if options.json {
        println!("{}", to_json(&output)?);
    } else {
        if let Some(error) = &output.validation.error {
            return Err(eyre!("Invalid JSON: {}", error));
        }
        println!("{}", format_json_text(&output, is_tty()));
    }

    if let Some(rendered) = &output.output {
        crate::clipboard::copy_if_requested(&global, rendered, "JSON");
    }

    Ok(())
}

/// Run `action` on `text`. Parse failures land in `validation`, never as `Err`.
pub fn json_data(text: &str, action: JsonAction, options: &JsonFormatOptions) -> JsonOutput {
    let source = if options.strip_comments {
        strip_json_comments(text)
    } else {
        text.to_string()
    };

    let validation = validate_json(&source);
    if !validation.is_valid || action == JsonAction::Validate {
        return JsonOutput {
            action,
            validation,
            output: None,
            stats: None,
        };
    }

    let rendered = match action {
        JsonAction::Minify => minify_json(&source),
        _ => format_json(
            &source,
            &JsonFormatOptions {
                strip_comments: false,
                ..*options
            },
        ),
    };

    match rendered {
        Ok(rendered) => {
            log::debug!("json {:?}: {} bytes", action, rendered.len());
            JsonOutput {
                action,
                stats: Some(text_stats(&rendered)),
                validation,
                output: Some(rendered),
            }
        }
        Err(e) => JsonOutput {
            action,
            validation: JsonValidation {
                is_valid: false,
                error: Some(e.to_string()),
            },
            output: None,
            stats: None,
        },
    }
}

/// Rendered document followed by a size footer on TTYs
pub fn format_json_text(output: &JsonOutput, decorate: bool) -> String {
    let Some(rendered) = &output.output else {
        let status = if output.validation.is_valid {
            "Valid JSON".green()
        } else {
            "Invalid JSON".red()
        };
        return match &output.validation.error {
            Some(error) => f!("{}: {}", status, error),
            None => status.to_string(),
        };
    };

    match (&output.stats, decorate) {
        (Some(stats), true) => f!(
            "{}\n{}",
            rendered,
            f!("{} characters, {} lines", stats.characters, stats.lines).bright_black()
        ),
        _ => rendered.clone(),
    }
}
