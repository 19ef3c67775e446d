use crate::prelude::{eprintln, *};
use devkit_core::hash::{HashOutcome, ALGORITHMS};
use devkit_core::uuid::{normalize_uuid, UuidFormat, MAX_BATCH_SIZE};
use serde::Deserialize;

use super::{parse_arguments, tool_failure, tool_success, JsonRpcError, INVALID_PARAMS};

pub async fn handle_hash_generate(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct HashGenerateArgs {
        text: String,
        algorithms: Option<Vec<String>>,
    }

    let args: HashGenerateArgs = parse_arguments(arguments)?;
    let ids = args
        .algorithms
        .filter(|ids| !ids.is_empty())
        .unwrap_or_else(|| ALGORITHMS.iter().map(|a| a.id.to_string()).collect());

    if global.verbose {
        eprintln!("Calling hash_generate: algorithms={}", ids.join(", "));
    }

    let results = crate::hash::hash_data(args.text.into_bytes(), &ids).await;

    if results.iter().all(|result| result.digest().is_none()) {
        let errors: Vec<String> = results
            .iter()
            .filter_map(|result| match &result.outcome {
                HashOutcome::Error(e) => Some(f!("{}: {e}", result.algorithm.id)),
                HashOutcome::Digest(_) => None,
            })
            .collect();
        return tool_failure(f!("Every hash algorithm failed ({})", errors.join(", ")));
    }

    tool_success(&results)
}

pub async fn handle_uuid_generate(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UuidGenerateArgs {
        count: Option<usize>,
        format: Option<UuidFormat>,
        normalize: Option<String>,
    }

    let args: UuidGenerateArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling uuid_generate: count={:?}, format={:?}, normalize={:?}",
            args.count, args.format, args.normalize
        );
    }

    if let Some(formatted) = args.normalize {
        return tool_success(&crate::uuid::UuidOutput {
            format: UuidFormat::Standard,
            uuids: vec![normalize_uuid(formatted.trim())],
        });
    }

    let count = args.count.unwrap_or(1);
    if !(1..=MAX_BATCH_SIZE).contains(&count) {
        return Err(JsonRpcError::new(
            INVALID_PARAMS,
            f!("Invalid arguments: count must be between 1 and {MAX_BATCH_SIZE}"),
        ));
    }

    tool_success(&crate::uuid::uuid_data(count, args.format.unwrap_or_default()))
}
