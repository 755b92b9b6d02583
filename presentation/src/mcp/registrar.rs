//! Tool registry and dispatch.
//!
//! One tool is exposed: `query_analytics`. Protocol-level mistakes (unknown
//! tool name) surface as JSON-RPC errors; everything the model can fix by
//! changing its arguments comes back in-band as a tool error.

use plausible_application::{AnalyticsGateway, RunQueryError, RunQueryUseCase};
use plausible_domain::{QueryParams, ValidationError};
use tracing::debug;

use super::protocol::{CallToolResult, RpcError, ToolDescriptor, ToolsListResult};
use super::schema::query_input_schema;

/// Name of the query tool.
pub const QUERY_TOOL: &str = "query_analytics";

const QUERY_TOOL_DESCRIPTION: &str =
    "Run an analytics query against a Plausible site. Returns aggregated metrics \
     (visitors, pageviews, bounce rate, ...) over a date range, optionally broken \
     down by dimensions and narrowed by filters. Results are JSON with one row per \
     dimension combination.";

/// Holds the query use case and dispatches tool calls onto it.
pub struct ToolRegistrar<G: AnalyticsGateway + 'static> {
    run_query: RunQueryUseCase<G>,
    default_site_id: Option<String>,
}

impl<G: AnalyticsGateway + 'static> ToolRegistrar<G> {
    pub fn new(run_query: RunQueryUseCase<G>) -> Self {
        Self {
            run_query,
            default_site_id: None,
        }
    }

    /// Use this site whenever a call omits `site_id`.
    pub fn with_default_site_id(mut self, site_id: impl Into<String>) -> Self {
        self.default_site_id = Some(site_id.into());
        self
    }

    pub fn list_tools(&self) -> ToolsListResult {
        ToolsListResult {
            tools: vec![ToolDescriptor {
                name: QUERY_TOOL,
                description: QUERY_TOOL_DESCRIPTION,
                input_schema: query_input_schema(),
            }],
        }
    }

    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, RpcError> {
        if name != QUERY_TOOL {
            return Err(RpcError::invalid_params(format!("Unknown tool: {}", name)));
        }
        debug!(tool = name, "Dispatching tool call");

        // Absent arguments mean "no parameters", not a malformed request.
        let arguments = if arguments.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            arguments
        };
        let mut params: QueryParams = match serde_json::from_value(arguments) {
            Ok(params) => params,
            Err(e) => {
                return Ok(CallToolResult::error(format!("Invalid arguments: {}", e)));
            }
        };

        if params.site_id.is_none() {
            params.site_id = self.default_site_id.clone();
        }

        match self.run_query.execute(params).await {
            Ok(result) => {
                let text = serde_json::to_string_pretty(&result).map_err(|e| {
                    RpcError::internal_error(format!("Failed to encode result: {}", e))
                })?;
                Ok(CallToolResult::text(text))
            }
            Err(RunQueryError::Validation(e)) => {
                Ok(CallToolResult::error(render_validation_error(&e)))
            }
            Err(RunQueryError::Gateway(e)) => {
                Ok(CallToolResult::error(format!("Query failed: {}", e)))
            }
        }
    }
}

/// Message plus fix-it hint, phrased for the model to act on.
fn render_validation_error(error: &ValidationError) -> String {
    match &error.details {
        Some(details) => format!("Invalid query: {}. {}.", error.message, details),
        None => format!("Invalid query: {}", error.message),
    }
}
