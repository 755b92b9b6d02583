//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for plausible-mcp
#[derive(Parser, Debug)]
#[command(name = "plausible-mcp")]
#[command(author, version, about = "MCP server exposing Plausible Analytics queries as a tool")]
#[command(long_about = r#"
Plausible MCP serves the Plausible Analytics query API to MCP clients
over stdio. Clients spawn it as a child process and exchange
newline-delimited JSON-RPC messages; logs go to stderr so stdout stays
clean for the protocol.

Configuration is loaded from (in priority order):
1. PLAUSIBLE_* environment variables (e.g. PLAUSIBLE_API_KEY)
2. --config <path>     Explicit config file
3. ./plausible-mcp.toml or ./.plausible-mcp.toml   Project-level config
4. ~/.config/plausible-mcp/config.toml             Global config

An API key is required, either via PLAUSIBLE_API_KEY or the api_key
setting in a config file.

Example:
  PLAUSIBLE_API_KEY=... plausible-mcp
  plausible-mcp --site-id example.com --config ./staging.toml
  plausible-mcp --show-config
"#)]
pub struct Cli {
    /// Default site to query when tool calls omit site_id
    #[arg(long, value_name = "DOMAIN")]
    pub site_id: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
