use crate::config::{ConfigOverrides, ENV_API_ENDPOINT, ENV_API_KEY, ENV_TIMEOUT_MS};
use clap::{Args, Parser, Subcommand};

/// Command-line interface for the `chatterbox` application.
#[derive(Debug, Parser)]
#[command(
    name = "chatterbox",
    version,
    about = "MCP server for joining online meetings and fetching their transcripts"
)]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Connection settings for the meeting-bot API.
#[derive(Debug, Default, Args)]
pub struct ApiArgs {
    /// Base URL of the Chatterbox API (overrides the config file).
    #[arg(long, global = true, env = ENV_API_ENDPOINT, value_name = "URL")]
    pub endpoint: Option<String>,
    /// API key sent as a bearer token (overrides the config file).
    #[arg(long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds; unset or `0` disables it.
    /// Validated when the server configuration is resolved.
    #[arg(long, global = true, env = ENV_TIMEOUT_MS, value_name = "MILLIS")]
    pub timeout_ms: Option<String>,
}

impl From<ApiArgs> for ConfigOverrides {
    fn from(args: ApiArgs) -> Self {
        Self {
            endpoint: args.endpoint,
            api_key: args.api_key,
            timeout_ms: args.timeout_ms,
        }
    }
}

/// Available `chatterbox` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Runs as an MCP server over stdio (default).
    Serve,
    /// Prints the advertised tool schemas as JSON.
    ListTools,
}
