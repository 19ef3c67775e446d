use crate::json::{json_data, JsonAction};
use crate::prelude::{eprintln, *};
use crate::whitespace::{resolve_options, whitespace_data, Preset};
use clap::ValueEnum;
use devkit_core::text::JsonFormatOptions;
use devkit_core::whitespace::CleaningOptions;
use serde::Deserialize;

use super::{parse_arguments, tool_failure, tool_success, JsonRpcError, INVALID_PARAMS};

pub async fn handle_json_format(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct JsonFormatArgs {
        text: String,
        action: Option<String>,
        indent: Option<usize>,
        sort_keys: Option<bool>,
        strip_comments: Option<bool>,
    }

    let args: JsonFormatArgs = parse_arguments(arguments)?;

    let action = match args.action.as_deref() {
        None | Some("format") => JsonAction::Format,
        Some("minify") => JsonAction::Minify,
        Some("validate") => JsonAction::Validate,
        Some(other) => {
            return Err(JsonRpcError::new(
                INVALID_PARAMS,
                f!("Invalid arguments: unknown action '{other}'"),
            ))
        }
    };

    let options = JsonFormatOptions {
        indent: args.indent.unwrap_or(2),
        sort_keys: args.sort_keys.unwrap_or(false),
        strip_comments: args.strip_comments.unwrap_or(false),
    };

    if global.verbose {
        eprintln!("Calling json_format: action={:?}, options={:?}", action, options);
    }

    let output = json_data(&args.text, action, &options);

    match (&output.validation.error, action) {
        (Some(error), JsonAction::Format | JsonAction::Minify) => {
            tool_failure(f!("Invalid JSON: {error}"))
        }
        _ => tool_success(&output),
    }
}

pub async fn handle_case_convert(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CaseConvertArgs {
        text: String,
        to: Option<String>,
    }

    let args: CaseConvertArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling case_convert: to={:?}", args.to);
    }

    match crate::case::case_data(&args.text, args.to.as_deref()) {
        Ok(output) => tool_success(&output),
        Err(e) => tool_failure(e),
    }
}

pub async fn handle_whitespace_clean(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct WhitespaceCleanArgs {
        text: String,
        preset: Option<String>,
        #[serde(flatten)]
        flags: CleaningOptions,
    }

    let args: WhitespaceCleanArgs = parse_arguments(arguments)?;

    let preset = args
        .preset
        .as_deref()
        .map(|name| Preset::from_str(name, true))
        .transpose()
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, f!("Invalid arguments: {e}")))?;
    let options = resolve_options(preset, args.flags);

    if global.verbose {
        eprintln!("Calling whitespace_clean: {:?}", options);
    }

    tool_success(&whitespace_data(&args.text, &options))
}
