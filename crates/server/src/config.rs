//! Configuration for the chatterbox server.
//!
//! The two required values (API endpoint and API key) and the optional
//! request timeout are resolved once at startup with the following
//! precedence:
//! CLI arguments > Environment variables (including `.env`) > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.chatterbox/config.toml
//!
//! [api]
//! # Base URL of the Chatterbox meeting-bot API
//! endpoint = "https://api.chatter-box.io"
//!
//! # Bearer credential sent with every request
//! api_key = "your-api-key"
//!
//! # Optional per-request timeout in milliseconds (0 or absent = none)
//! timeout_ms = 30000
//! ```

use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_ENDPOINT: &str = "CHATTERBOX_API_ENDPOINT";
pub const ENV_API_KEY: &str = "CHATTERBOX_API_KEY";
pub const ENV_TIMEOUT_MS: &str = "CHATTERBOX_TIMEOUT_MS";

/// Errors raised while resolving configuration. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error: CHATTERBOX_API_ENDPOINT and CHATTERBOX_API_KEY environment variables are required")]
    Missing,
    #[error("invalid CHATTERBOX_API_ENDPOINT url `{value}`: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("invalid CHATTERBOX_TIMEOUT_MS value `{value}`: expected milliseconds as a whole number")]
    InvalidTimeout { value: String },
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration file structure.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
}

/// The `[api]` table of the configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct ApiSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Values supplied on the command line or through the environment.
///
/// The timeout stays raw text here so that a malformed value is reported
/// as a configuration error rather than a usage error.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: Option<String>,
}

/// Immutable process-wide configuration, shared by every tool handler.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: Url,
    pub api_key: String,
    /// `None` leaves requests bounded only by the transport.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Builds a configuration from already-known values.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if endpoint.trim().is_empty() || api_key.trim().is_empty() {
            return Err(ConfigError::Missing);
        }
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            api_key,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Merges overrides with the optional config file.
    ///
    /// Empty strings count as unset so that a blank `CHATTERBOX_API_KEY=`
    /// line does not shadow the config file.
    pub fn resolve(
        overrides: ConfigOverrides,
        file: Option<&ConfigFile>,
    ) -> Result<Self, ConfigError> {
        let section = file.map(|f| &f.api);
        let endpoint = first_non_empty(
            overrides.endpoint,
            section.and_then(|s| s.endpoint.clone()),
        );
        let api_key = first_non_empty(overrides.api_key, section.and_then(|s| s.api_key.clone()));
        let (Some(endpoint), Some(api_key)) = (endpoint, api_key) else {
            return Err(ConfigError::Missing);
        };

        let timeout_ms = match overrides.timeout_ms.filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?,
            ),
            None => section.and_then(|s| s.timeout_ms),
        };

        Ok(Self::new(&endpoint, api_key)?.with_timeout(timeout_ms.map(Duration::from_millis)))
    }
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base url".into()));
    }
    Ok(url)
}

/// Returns the path to the config file (`~/.chatterbox/config.toml`).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatterbox").join("config.toml"))
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist and `Err` if it exists but
/// cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        target: "chatterbox::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Single-line JSON diagnostic written to stderr before a fatal exit.
pub fn fatal_diagnostic(err: &ConfigError) -> String {
    json!({ "level": "error", "message": err.to_string() }).to_string()
}
