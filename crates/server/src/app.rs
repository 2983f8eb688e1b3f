//! Implements the primary functionality for the `chatterbox` application.
//!
//! `ChatterboxService` owns the tool registry and is what the MCP transport
//! talks to; `run` parses the command line and starts it.

use crate::cli::{Cli, Commands};
use crate::client::ChatterboxClient;
use crate::commands::{handle_list_tools_command, handle_serve_command};
use crate::config::GatewayConfig;
use crate::gateway::{into_call_tool_result, ToolRegistry};
use crate::tools::build_registry;
use anyhow::{Context, Result};
use clap::Parser;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use std::sync::Arc;

/// Serves the meeting tools over MCP.
///
/// The registry is immutable after construction, so the service is cheap to
/// clone and safe to share between concurrent invocations.
#[derive(Debug, Clone)]
pub struct ChatterboxService {
    registry: Arc<ToolRegistry>,
}

impl ChatterboxService {
    /// Builds the service and its API client from the resolved configuration.
    pub fn new(config: Arc<GatewayConfig>) -> Result<Self> {
        let client = ChatterboxClient::new(&config).context("building HTTP client")?;
        let registry = build_registry(Arc::new(client)).context("registering tools")?;
        Ok(Self::with_registry(registry))
    }

    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Dispatches one tool call and flattens its outcome into an MCP result.
    pub async fn call(&self, name: &str, args: Option<&JsonObject>) -> CallToolResult {
        tracing::debug!(target: "chatterbox::service", tool = name, "tool call");
        let outcome = self.registry.dispatch(name, args).await;
        if let Err(err) = &outcome {
            tracing::debug!(
                target: "chatterbox::service",
                tool = name,
                code = err.code.as_str(),
                "tool call failed"
            );
        }
        into_call_tool_result(outcome)
    }
}

/// The main entry point for the `chatterbox` application.
pub fn run() -> Result<()> {
    // Must precede argument parsing so clap's `env` fallbacks see `.env` values.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => handle_serve_command(cli.api),
        Commands::ListTools => handle_list_tools_command(),
    }
}
