use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_arguments, tool_failure, tool_success, JsonRpcError};

pub async fn handle_jwt_decode(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct JwtDecodeArgs {
        token: String,
    }

    let args: JwtDecodeArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling jwt_decode: {} chars", args.token.len());
    }

    let output = crate::jwt::jwt_data(args.token.trim(), chrono::Utc::now());

    match &output.result.error {
        Some(error) => tool_failure(error),
        None => tool_success(&output),
    }
}
