//! Configuration loading and server URL resolution
//!
//! Bootstrap configuration comes from an optional TOML file. The server URL
//! follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`MOODTUNE_SERVER_URL`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Compiled default for the recommendation server
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "MOODTUNE_SERVER_URL";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Base URL of the recommendation server (no trailing path)
    #[serde(default)]
    pub server_url: Option<String>,

    /// Whole-request timeout for the upload, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_request_timeout_secs() -> u64 {
    60 // image analysis on the backend is slow on first request
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration from an explicit path (file must exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `path`, or the platform default location
    ///
    /// An explicit path must exist. A missing default file is not an error:
    /// built-in defaults are returned instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match config_file_to_load(path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Platform config file location (`~/.config/moodtune/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("moodtune").join("config.toml"))
}

/// File that `TomlConfig::load` reads, if any
fn config_file_to_load(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let found = default_config_path().filter(|p| p.exists());
            if found.is_none() {
                debug!("No config file found, using built-in defaults");
            }
            found
        }
    }
}

/// Where the resolved server URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerUrlSource {
    CommandLine,
    Environment,
    TomlConfig,
    CompiledDefault,
}

impl std::fmt::Display for ServerUrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ServerUrlSource::CommandLine => "command line",
            ServerUrlSource::Environment => "environment",
            ServerUrlSource::TomlConfig => "TOML config",
            ServerUrlSource::CompiledDefault => "compiled default",
        };
        f.write_str(s)
    }
}

/// Resolve the server URL per the CLI → ENV → TOML → default priority
pub fn resolve_server_url(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    resolve_server_url_with_source(cli_arg, toml_config).map(|(url, _)| url)
}

/// Like [`resolve_server_url`], also reporting which layer supplied the URL
pub fn resolve_server_url_with_source(
    cli_arg: Option<&str>,
    toml_config: &TomlConfig,
) -> Result<(String, ServerUrlSource)> {
    // Priority 1: Command-line argument
    // Priority 2: Environment variable
    // Priority 3: TOML config file
    let (url, source) = if let Some(url) = cli_arg {
        (url.to_string(), ServerUrlSource::CommandLine)
    } else if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        (url, ServerUrlSource::Environment)
    } else if let Some(url) = &toml_config.server_url {
        (url.clone(), ServerUrlSource::TomlConfig)
    } else {
        // Priority 4: Compiled default
        (DEFAULT_SERVER_URL.to_string(), ServerUrlSource::CompiledDefault)
    };

    let url = normalize_server_url(&url)?;
    debug!(server_url = %url, %source, "Resolved server URL");
    Ok((url, source))
}

/// Validate scheme and strip trailing slashes
fn normalize_server_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Server URL is empty".to_string()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::InvalidInput(format!(
            "Server URL must start with http:// or https://: {}",
            url
        )));
    }
    Ok(trimmed.to_string())
}

/// Fully resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub server_url_source: ServerUrlSource,
    pub request_timeout: Duration,
    pub log_level: String,
    /// TOML file the settings were read from, `None` when defaults were used
    pub config_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Resolve from CLI arguments, environment, and TOML file
    pub fn resolve(cli_server_url: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let config_file = config_file_to_load(config_path);
        let toml_config = match &config_file {
            Some(path) => TomlConfig::load_from(path)?,
            None => TomlConfig::default(),
        };

        Ok(Self {
            config_file,
            ..Self::from_toml(cli_server_url, &toml_config)?
        })
    }

    /// Resolve against an already loaded TOML config
    pub fn from_toml(cli_server_url: Option<&str>, toml_config: &TomlConfig) -> Result<Self> {
        if toml_config.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        let (server_url, server_url_source) =
            resolve_server_url_with_source(cli_server_url, toml_config)?;

        Ok(Self {
            server_url,
            server_url_source,
            request_timeout: Duration::from_secs(toml_config.request_timeout_secs),
            log_level: toml_config.logging.level.clone(),
            config_file: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_server_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
    }

    #[test]
    fn test_normalize_rejects_missing_scheme() {
        assert!(matches!(
            normalize_server_url("localhost:5000"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(normalize_server_url("  "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_toml_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server_url.is_none());
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TomlConfig {
            server_url: Some("http://example.test".to_string()),
            request_timeout_secs: 0,
            ..TomlConfig::default()
        };
        assert!(ClientConfig::from_toml(Some("http://example.test"), &config).is_err());
    }
}
