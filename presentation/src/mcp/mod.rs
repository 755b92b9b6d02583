//! MCP (Model Context Protocol) surface.
//!
//! Everything an MCP client sees lives here: the JSON-RPC message
//! types, the input schema advertised for the query tool, the
//! registrar that routes tool calls into the application layer, and
//! the stdio server loop that ties them together.

pub mod protocol;
pub mod registrar;
pub mod schema;
pub mod server;

pub use registrar::{QUERY_TOOL, ToolRegistrar};
pub use server::McpServer;
