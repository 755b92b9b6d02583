//! Presentation layer for plausible-mcp
//!
//! This crate contains CLI definitions and the MCP stdio surface:
//! JSON-RPC message types, the tool registrar, and the server loop.

pub mod cli;
pub mod mcp;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::{McpServer, QUERY_TOOL, ToolRegistrar};
