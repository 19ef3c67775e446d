mod cli;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
    }
}

/// Answer one JSON-RPC message. Notifications, which carry no `id`, get no response.
pub async fn handle_request(request_str: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let message: serde_json::Value = match serde_json::from_str(request_str) {
        Ok(message) => message,
        Err(e) => {
            return Some(error_response(
                None,
                JsonRpcError::new(PARSE_ERROR, f!("Parse error: {e}")),
            ));
        }
    };

    let is_notification = message
        .as_object()
        .is_some_and(|object| !object.contains_key("id"));
    let id = message.get("id").cloned();

    let request = match serde_json::from_value::<JsonRpcRequest>(message) {
        Ok(request) if request.jsonrpc == "2.0" => request,
        Ok(request) => {
            let error = JsonRpcError::new(
                INVALID_REQUEST,
                f!("Invalid request: unsupported jsonrpc version {}", request.jsonrpc),
            );
            return (!is_notification).then(|| error_response(id, error));
        }
        Err(e) => {
            let error = JsonRpcError::new(INVALID_REQUEST, f!("Invalid request: {e}"));
            return (!is_notification).then(|| error_response(id, error));
        }
    };

    if is_notification {
        log::debug!("received notification {}", request.method);
        return None;
    }

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            f!("Method not found: {method}"),
        )),
    };

    Some(match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => error_response(request.id, error),
    })
}

fn error_response(id: Option<serde_json::Value>, error: JsonRpcError) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn global() -> crate::Global {
        crate::Global {
            verbose: false,
            copy: false,
        }
    }

    async fn call(request: Value) -> Value {
        let response = handle_request(&request.to_string(), &global())
            .await
            .expect("request should get a response");
        serde_json::to_value(response).unwrap()
    }

    async fn call_tool(name: &str, arguments: Value) -> Value {
        call(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }))
        .await
    }

    fn tool_text(response: &Value) -> &str {
        response["result"]["content"][0]["text"].as_str().unwrap()
    }

    // ============================================================================
    // Protocol tests
    // ============================================================================

    #[tokio::test]
    async fn test_parse_error() {
        let response = handle_request("{not json", &global()).await.unwrap();
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["error"]["code"], PARSE_ERROR);
        assert_eq!(value["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_method_not_found() {
        let value = call(json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"})).await;
        assert_eq!(value["id"], 7);
        assert_eq!(value["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let request = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(handle_request(&request.to_string(), &global())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_any_request_without_id_is_a_notification() {
        let request = json!({"jsonrpc": "2.0", "method": "tools/list"});
        assert!(handle_request(&request.to_string(), &global())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_missing_jsonrpc_is_invalid_request() {
        let value = call(json!({"id": 3, "method": "ping"})).await;
        assert_eq!(value["error"]["code"], INVALID_REQUEST);
        assert_eq!(value["id"], 3);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version_is_invalid_request() {
        let value = call(json!({"jsonrpc": "1.0", "id": 4, "method": "ping"})).await;
        assert_eq!(value["error"]["code"], INVALID_REQUEST);
        assert_eq!(value["id"], 4);
    }

    #[tokio::test]
    async fn test_non_object_message_is_invalid_request() {
        let value = call(json!([1, 2])).await;
        assert_eq!(value["error"]["code"], INVALID_REQUEST);
        assert_eq!(value["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_initialize() {
        let value = call(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})).await;
        assert_eq!(value["result"]["serverInfo"]["name"], "devkit");
        assert_eq!(value["result"]["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let value = call(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let names: Vec<&str> = value["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();

        assert_eq!(
            names,
            vec![
                "url",
                "base64",
                "jwt_decode",
                "json_format",
                "case_convert",
                "whitespace_clean",
                "hash_generate",
                "uuid_generate",
                "detect_input",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let value = call_tool("qr_code", json!({})).await;
        assert_eq!(value["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let value = call_tool("url", json!({"text": 42})).await;
        assert_eq!(value["error"]["code"], INVALID_PARAMS);
    }

    // ============================================================================
    // Tool tests
    // ============================================================================

    #[tokio::test]
    async fn test_url_tool_detects_mode() {
        let value = call_tool("url", json!({"text": "hello%20world"})).await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        assert_eq!(output["mode"], "decode");
        assert_eq!(output["output"], "hello world");
    }

    #[tokio::test]
    async fn test_base64_tool_failure_is_tool_error() {
        let value = call_tool("base64", json!({"text": "abc", "mode": "decode"})).await;
        assert_eq!(value["result"]["isError"], true);
        assert!(tool_text(&value).contains("Invalid input"));
    }

    #[tokio::test]
    async fn test_jwt_tool_invalid_token() {
        let value = call_tool("jwt_decode", json!({"token": "a.b"})).await;
        assert_eq!(value["result"]["isError"], true);
        assert!(tool_text(&value).contains("exactly 3 parts"));
    }

    #[tokio::test]
    async fn test_json_tool_sorts_keys() {
        let value = call_tool(
            "json_format",
            json!({"text": "{\"b\":1,\"a\":2}", "sort_keys": true, "indent": 0}),
        )
        .await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        assert_eq!(output["output"], "{\"a\":2,\"b\":1}");
    }

    #[tokio::test]
    async fn test_case_tool_single_conversion() {
        let value = call_tool("case_convert", json!({"text": "hello world", "to": "kebab"})).await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        assert_eq!(output["conversions"][0]["output"], "hello-world");
    }

    #[tokio::test]
    async fn test_whitespace_tool_preset() {
        let value = call_tool(
            "whitespace_clean",
            json!({"text": " a \n b ", "preset": "single-line"}),
        )
        .await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        assert_eq!(output["output"], "a b");
    }

    #[tokio::test]
    async fn test_hash_tool_partial_results() {
        let value = call_tool(
            "hash_generate",
            json!({"text": "hello", "algorithms": ["md5", "crc32"]}),
        )
        .await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        assert_eq!(output[0]["digest"], "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(output[1]["error"], "Unsupported algorithm: crc32");
        assert_eq!(value["result"]["isError"], Value::Null);
    }

    #[tokio::test]
    async fn test_uuid_tool_count() {
        let value = call_tool("uuid_generate", json!({"count": 3, "format": "no-hyphens"})).await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        let uuids = output["uuids"].as_array().unwrap();
        assert_eq!(uuids.len(), 3);
        assert!(uuids.iter().all(|uuid| uuid.as_str().unwrap().len() == 32));
    }

    #[tokio::test]
    async fn test_detect_tool() {
        let value = call_tool("detect_input", json!({"text": "hello_world"})).await;
        let output: Value = serde_json::from_str(tool_text(&value)).unwrap();
        assert_eq!(output["url"], "encode");
        assert_eq!(output["base64"], "encode");
        assert_eq!(output["case"], "snake_case");
    }
}
