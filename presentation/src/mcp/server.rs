//! Stdio JSON-RPC server loop.
//!
//! MCP clients spawn the server as a child process and exchange
//! newline-delimited JSON-RPC 2.0 messages over stdin/stdout. This
//! module owns that loop:
//!
//! ```text
//!   stdin line ──> parse ──> dispatch ──────> response ──> stdout line
//!                    │           │
//!                    │           └─ notification? drop (no response)
//!                    └─ malformed? respond id=null, code -32700
//! ```
//!
//! Stdout carries protocol messages only. All diagnostics go through
//! `tracing`, which the binary wires to stderr (or a log file).

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, trace, warn};

use plausible_application::AnalyticsGateway;

use super::protocol::{
    CallToolParams, InitializeResult, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, RpcError,
};
use super::registrar::ToolRegistrar;

/// Serves MCP requests over stdin/stdout until the client disconnects.
pub struct McpServer<G: AnalyticsGateway + 'static> {
    registrar: ToolRegistrar<G>,
}

impl<G: AnalyticsGateway + 'static> McpServer<G> {
    pub fn new(registrar: ToolRegistrar<G>) -> Self {
        Self { registrar }
    }

    /// Runs the read-dispatch-write loop until stdin reaches EOF.
    pub async fn run(&self) -> std::io::Result<()> {
        let mut reader = BufReader::new(tokio::io::stdin());
        let mut writer = tokio::io::stdout();
        let mut line = String::new();

        info!("MCP server listening on stdio");

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("Client closed stdin, shutting down");
                    break;
                }
                Ok(_) => {
                    let raw = line.trim();
                    if raw.is_empty() {
                        continue;
                    }
                    trace!(message = raw, "Received");

                    if let Some(response) = self.handle_line(raw).await {
                        match serde_json::to_string(&response) {
                            Ok(mut out) => {
                                out.push('\n');
                                writer.write_all(out.as_bytes()).await?;
                                writer.flush().await?;
                            }
                            Err(e) => {
                                warn!("Failed to serialize response: {}", e);
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Read error on stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Parses one raw line and dispatches it.
    ///
    /// Returns `None` for notifications, which must never be answered.
    /// Malformed JSON gets a parse-error response with a null id since
    /// the real id is unrecoverable.
    async fn handle_line(&self, raw: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(raw) {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    RpcError::parse_error(e.to_string()),
                ));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        Some(self.handle_request(request).await)
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != JSONRPC_VERSION {
            return JsonRpcResponse::error(
                id,
                RpcError::invalid_request(format!(
                    "Expected jsonrpc \"{}\", got \"{}\"",
                    JSONRPC_VERSION, request.jsonrpc
                )),
            );
        }

        debug!(method = %request.method, "Dispatching request");

        match request.method.as_str() {
            "initialize" => match serde_json::to_value(InitializeResult::current()) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, RpcError::internal_error(e.to_string())),
            },
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => match serde_json::to_value(self.registrar.list_tools()) {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, RpcError::internal_error(e.to_string())),
            },
            "tools/call" => {
                let params: CallToolParams = match request
                    .params
                    .map(serde_json::from_value)
                    .transpose()
                {
                    Ok(Some(p)) => p,
                    Ok(None) => {
                        return JsonRpcResponse::error(
                            id,
                            RpcError::invalid_params("Missing params for tools/call"),
                        );
                    }
                    Err(e) => {
                        return JsonRpcResponse::error(
                            id,
                            RpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                        );
                    }
                };

                match self.registrar.call_tool(&params.name, params.arguments).await {
                    Ok(result) => match serde_json::to_value(result) {
                        Ok(value) => JsonRpcResponse::success(id, value),
                        Err(e) => {
                            JsonRpcResponse::error(id, RpcError::internal_error(e.to_string()))
                        }
                    },
                    Err(rpc_error) => JsonRpcResponse::error(id, rpc_error),
                }
            }
            other => JsonRpcResponse::error(id, RpcError::method_not_found(other)),
        }
    }
}
