//! Configuration file loading for plausible-mcp
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `PLAUSIBLE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./plausible-mcp.toml` or `./.plausible-mcp.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/plausible-mcp/config.toml`
//! 5. Fallback: `~/.config/plausible-mcp/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, LoggingConfig, PlausibleConfig};
pub use loader::ConfigLoader;
