use crate::prelude::{eprintln, *};
use devkit_core::detect::{detect_base64, detect_text_case, detect_url_encoding, EncodingMode};
use serde::{Deserialize, Serialize};

use super::{parse_arguments, tool_failure, tool_success, JsonRpcError};

#[derive(Deserialize)]
struct CodecArgs {
    text: String,
    mode: Option<EncodingMode>,
}

pub async fn handle_url(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CodecArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling url: mode={:?}, {} chars", args.mode, args.text.len());
    }

    match crate::url::url_data(&args.text, args.mode) {
        Ok(output) => tool_success(&output),
        Err(e) => tool_failure(e),
    }
}

pub async fn handle_base64(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CodecArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling base64: mode={:?}, {} chars", args.mode, args.text.len());
    }

    match crate::base64::base64_data(&args.text, args.mode) {
        Ok(output) => tool_success(&output),
        Err(e) => tool_failure(e),
    }
}

#[derive(Debug, Serialize)]
struct Detection {
    url: EncodingMode,
    base64: EncodingMode,
    case: &'static str,
}

pub async fn handle_detect_input(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DetectArgs {
        text: String,
    }

    let args: DetectArgs = parse_arguments(arguments)?;

    let detection = Detection {
        url: detect_url_encoding(&args.text),
        base64: detect_base64(&args.text),
        case: detect_text_case(&args.text),
    };

    if global.verbose {
        eprintln!("Calling detect_input: {:?}", detection);
    }

    tool_success(&detection)
}
