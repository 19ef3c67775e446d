mod codec;
mod generate;
mod jwt;
mod text;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "devkit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    to_value(result)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let text_argument = serde_json::json!({
        "type": "string",
        "description": "Input text"
    });
    let mode_argument = serde_json::json!({
        "type": "string",
        "description": "Force a direction instead of detecting it from the input",
        "enum": ["encode", "decode"]
    });

    let tools = vec![
        Tool {
            name: "url".to_string(),
            description: "Percent-encode or decode a URL component. Without a mode, text containing %XX escapes is decoded and anything else is encoded. Returns the chosen mode, whether it was auto-detected, and the output.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument,
                    "mode": mode_argument
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "base64".to_string(),
            description: "Encode UTF-8 text as standard padded Base64 or decode it back. Without a mode, text in the Base64 alphabet whose length is a multiple of 4 (and longer than 4) is decoded.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument,
                    "mode": mode_argument
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "jwt_decode".to_string(),
            description: "Decode a JSON Web Token without verifying its signature. Returns the decoded header and payload, the raw signature, formatted iat/nbf/exp claims, and warnings about expiry, not-before and weak algorithms.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "token": {
                        "type": "string",
                        "description": "Compact JWT (header.payload.signature)"
                    }
                },
                "required": ["token"]
            }),
        },
        Tool {
            name: "json_format".to_string(),
            description: "Format, minify or validate a JSON document. Formatting supports an indent width, recursive key sorting and stripping // and /* */ comments. Parse errors include line and column.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument,
                    "action": {
                        "type": "string",
                        "description": "What to do with the document (default: format)",
                        "enum": ["format", "minify", "validate"]
                    },
                    "indent": {
                        "type": "number",
                        "description": "Spaces per indentation level, 0 for a single line (default: 2)"
                    },
                    "sort_keys": {
                        "type": "boolean",
                        "description": "Sort object keys recursively (default: false)"
                    },
                    "strip_comments": {
                        "type": "boolean",
                        "description": "Remove comments before parsing (default: false)"
                    }
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "case_convert".to_string(),
            description: "Convert text between naming conventions: camel, pascal, snake, kebab, upper (UPPER_CASE), lower, upperall (UPPERCASE), title and sentence. Without a target every conversion is returned along with the detected case.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument,
                    "to": {
                        "type": "string",
                        "description": "Conversion id (optional)",
                        "enum": ["camel", "pascal", "snake", "kebab", "upper", "lower", "upperall", "title", "sentence"]
                    }
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "whitespace_clean".to_string(),
            description: "Clean up whitespace. Use a preset (trim, compact, single-line, standard) and/or individual flags. Without any option the standard preset applies: tabs become spaces and runs of whitespace collapse.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument,
                    "preset": {
                        "type": "string",
                        "enum": ["trim", "compact", "single-line", "standard"]
                    },
                    "trim_only": { "type": "boolean" },
                    "remove_line_breaks": { "type": "boolean" },
                    "remove_extra_spaces": { "type": "boolean" },
                    "remove_tabs": { "type": "boolean" },
                    "remove_all_whitespace": { "type": "boolean" }
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "hash_generate".to_string(),
            description: "Hash UTF-8 text with MD5, SHA-1, SHA-256, SHA-384 and SHA-512 as lowercase hex. Each algorithm reports a digest or an error independently.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument,
                    "algorithms": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Algorithm ids: md5, sha1, sha256, sha384, sha512 (default: all)"
                    }
                },
                "required": ["text"]
            }),
        },
        Tool {
            name: "uuid_generate".to_string(),
            description: "Generate random version 4 UUIDs, up to 50 per call, or normalize an existing UUID back to canonical form.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "count": {
                        "type": "number",
                        "description": "How many UUIDs to generate (default: 1, max: 50)"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["standard", "no-hyphens", "braces", "uppercase"]
                    },
                    "normalize": {
                        "type": "string",
                        "description": "UUID to convert to canonical lowercase hyphenated form"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "detect_input".to_string(),
            description: "Guess what a piece of text is: whether it looks URL-encoded, whether it looks like Base64, and which naming convention it follows.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": text_argument
                },
                "required": ["text"]
            }),
        },
    ];

    to_value(ToolsList { tools })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    log::debug!("tools/call {}", params.name);

    match params.name.as_str() {
        "url" => codec::handle_url(params.arguments, global).await,
        "base64" => codec::handle_base64(params.arguments, global).await,
        "detect_input" => codec::handle_detect_input(params.arguments, global).await,
        "jwt_decode" => jwt::handle_jwt_decode(params.arguments, global).await,
        "json_format" => text::handle_json_format(params.arguments, global).await,
        "case_convert" => text::handle_case_convert(params.arguments, global).await,
        "whitespace_clean" => text::handle_whitespace_clean(params.arguments, global).await,
        "hash_generate" => generate::handle_hash_generate(params.arguments, global).await,
        "uuid_generate" => generate::handle_uuid_generate(params.arguments, global).await,
        _ => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}

/// Deserialize a tool's `arguments` object
pub fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))
}

/// Wrap a successful tool output as pretty JSON text content
pub fn tool_success<T: Serialize>(output: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(output)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Serialization error: {e}")))?;

    to_value(CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    })
}

/// Report a failed tool run. This is a tool result, not a protocol error.
pub fn tool_failure(message: impl std::fmt::Display) -> Result<serde_json::Value, JsonRpcError> {
    log::warn!("tool failed: {message}");

    to_value(CallToolResult {
        content: vec![Content::Text {
            text: message.to_string(),
        }],
        is_error: Some(true),
    })
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}
