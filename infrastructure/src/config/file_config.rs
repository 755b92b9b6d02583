//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field has a default, so partial files (or none at all) are fine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Analytics API connection settings
    pub plausible: PlausibleConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl FileConfig {
    /// Check the configuration for suspicious values, returning one message
    /// per finding. A missing API key is not reported here: whether it is
    /// fatal depends on the command, so the caller decides.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.plausible.base_url.trim().is_empty() {
            warnings.push("plausible.base_url is empty; queries cannot be sent".to_string());
        } else if !self.plausible.base_url.starts_with("http") {
            warnings.push(format!(
                "plausible.base_url does not look like a URL: '{}'",
                self.plausible.base_url
            ));
        }

        if self.plausible.timeout_secs == 0 {
            warnings.push(
                "plausible.timeout_secs is 0; every request will time out immediately"
                    .to_string(),
            );
        }

        warnings
    }
}

/// Raw analytics API configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlausibleConfig {
    /// Base URL of the analytics instance (self-hosted instances override this)
    pub base_url: String,
    /// API key for Bearer authentication
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Site used when a query omits `site_id`
    pub default_site_id: Option<String>,
}

impl Default for PlausibleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://plausible.io".to_string(),
            api_key: None,
            timeout_secs: 30,
            default_site_id: None,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. "info" or "plausible_mcp=debug").
    /// CLI verbosity flags take precedence.
    pub level: Option<String>,
    /// Log to this file instead of stderr
    pub file: Option<PathBuf>,
}
