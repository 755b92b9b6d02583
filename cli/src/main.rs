//! CLI entrypoint for Plausible MCP
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use plausible_application::RunQueryUseCase;
use plausible_infrastructure::{ConfigLoader, FileConfig, PlausibleClient};
use plausible_presentation::{Cli, McpServer, ToolRegistrar};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(c) => c,
            Err(e) => bail!("Failed to load configuration: {}", e),
        }
    };

    // Initialize logging based on verbosity level. Stdout carries the
    // MCP protocol, so diagnostics go to stderr or a log file.
    let filter = match cli.verbose {
        0 => EnvFilter::new(config.logging.level.as_deref().unwrap_or("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    let _guard = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    };

    for warning in config.validate() {
        warn!("Config: {}", warning);
    }

    let Some(api_key) = config.plausible.api_key.clone() else {
        bail!(
            "No API key configured. Set PLAUSIBLE_API_KEY or add api_key \
             to the [plausible] section of a config file."
        );
    };

    info!("Starting Plausible MCP server");

    // === Dependency Injection ===
    // Create infrastructure adapter (Plausible HTTP client)
    let gateway = Arc::new(PlausibleClient::new(
        &config.plausible.base_url,
        api_key,
        config.plausible.timeout_secs,
    )?);

    // Create use case with injected gateway
    let use_case = RunQueryUseCase::new(gateway);

    let mut registrar = ToolRegistrar::new(use_case);
    if let Some(site_id) = cli.site_id.or(config.plausible.default_site_id) {
        info!(site_id = %site_id, "Using default site");
        registrar = registrar.with_default_site_id(site_id);
    }

    McpServer::new(registrar).run().await?;

    Ok(())
}
