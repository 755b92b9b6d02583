//! JSON-RPC protocol types for MCP communication.
//!
//! This module defines the message structures used in the JSON-RPC 2.0
//! protocol between an MCP client (the LLM host) and this server.
//!
//! # Protocol Overview
//!
//! - **Requests**: Client → Server (`initialize`, `tools/list`, `tools/call`, `ping`)
//! - **Responses**: Server → Client (result or error, echoing the request id)
//! - **Notifications**: Client → Server (e.g. `notifications/initialized`),
//!   which never receive a response
//!
//! Tool failures are reported in-band via [`CallToolResult::error`] so the
//! model can read them and correct the call; JSON-RPC errors are reserved
//! for protocol-level problems.

use serde::{Deserialize, Serialize};

/// JSON-RPC version sent in every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server implements.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// An incoming JSON-RPC message: request if `id` is present, notification
/// otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no `id` and must not be answered.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    /// Echoed from the request (null when the request id was unreadable).
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: serde_json::Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }
}

/// Result of the `initialize` handshake
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

impl InitializeResult {
    pub fn current() -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION,
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "plausible-mcp",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Capabilities advertised during `initialize`
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// The tool set is static, so clients never need to re-list.
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Result of `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDescriptor>,
}

/// One tool as advertised to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Result of a `tools/call` request.
///
/// `is_error` marks in-band tool failures (validation errors, upstream API
/// errors) that the model should read and react to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: true,
        }
    }
}

/// A typed content block in a tool result
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_with_id_is_not_notification() {
        let request: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list"
        }))
        .unwrap();
        assert!(!request.is_notification());
        assert_eq!(request.method, "tools/list");
    }

    #[test]
    fn request_without_id_is_notification() {
        let request: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .unwrap();
        assert!(request.is_notification());
    }

    #[test]
    fn string_ids_are_preserved() {
        let request: JsonRpcRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "req-7",
            "method": "ping"
        }))
        .unwrap();

        let response = JsonRpcResponse::success(request.id.unwrap(), json!({}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], json!("req-7"));
    }

    #[test]
    fn success_response_omits_error() {
        let response = JsonRpcResponse::success(json!(1), json!({"ok": true}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["result"]["ok"], json!(true));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn error_response_omits_result() {
        let response = JsonRpcResponse::error(json!(2), RpcError::method_not_found("bogus"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["code"], json!(-32601));
        assert!(value["error"]["message"].as_str().unwrap().contains("bogus"));
        assert!(value.get("result").is_none());
    }

    #[test]
    fn initialize_result_shape() {
        let value = serde_json::to_value(InitializeResult::current()).unwrap();
        assert_eq!(value["protocolVersion"], json!(MCP_PROTOCOL_VERSION));
        assert_eq!(value["capabilities"]["tools"]["listChanged"], json!(false));
        assert_eq!(value["serverInfo"]["name"], json!("plausible-mcp"));
    }

    #[test]
    fn call_tool_result_uses_camel_case() {
        let value = serde_json::to_value(CallToolResult::error("bad query")).unwrap();
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["type"], json!("text"));
        assert_eq!(value["content"][0]["text"], json!("bad query"));
    }

    #[test]
    fn call_tool_params_default_arguments() {
        let params: CallToolParams =
            serde_json::from_value(json!({"name": "query_analytics"})).unwrap();
        assert_eq!(params.arguments, serde_json::Value::Null);
    }
}
