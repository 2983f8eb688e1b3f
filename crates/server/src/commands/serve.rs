//! Handler for the `serve` command.

use crate::app::ChatterboxService;
use crate::cli::ApiArgs;
use crate::config::{
    config_path, fatal_diagnostic, load_config_file, ConfigError, GatewayConfig,
};
use anyhow::{anyhow, Result};
use rmcp::service::serve_server;
use rmcp::transport::stdio;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Resolves configuration from flags, environment and the config file.
fn resolve_config(api: ApiArgs) -> Result<GatewayConfig, ConfigError> {
    let file = match config_path() {
        Some(path) => load_config_file(&path)?,
        None => None,
    };
    GatewayConfig::resolve(api.into(), file.as_ref())
}

/// Handle the `serve` command.
///
/// Configuration problems are fatal: a JSON diagnostic is written to stderr
/// and the process exits with status 1 before any transport is opened.
pub(crate) fn handle_serve_command(api: ApiArgs) -> Result<()> {
    let config = match resolve_config(api) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", fatal_diagnostic(&err));
            std::process::exit(1);
        }
    };

    tracing::info!(
        target: "chatterbox::serve",
        endpoint = %config.endpoint,
        timeout_ms = config.timeout.map(|t| t.as_millis() as u64),
        "starting chatterbox MCP server on stdio"
    );

    let service = ChatterboxService::new(Arc::new(config))?;
    let rt = Runtime::new()?;
    let running = rt.block_on(async {
        serve_server(service, stdio())
            .await
            .map_err(|e| anyhow!("failed to start server: {e}"))
    })?;
    let reason = rt.block_on(async {
        running
            .waiting()
            .await
            .map_err(|e| anyhow!("server task ended: {e}"))
    })?;
    tracing::info!(target: "chatterbox::serve", ?reason, "server stopped");
    Ok(())
}
