//! Client configuration loading
//!
//! Setting resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: a warning is logged and defaults
//! are used. A config file that exists but does not parse is an error.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Environment variable overriding `server_url`
pub const SERVER_URL_ENV: &str = "DASHPREFS_SERVER_URL";

/// Environment variable overriding `api_token`
pub const API_TOKEN_ENV: &str = "DASHPREFS_API_TOKEN";

/// Client configuration loaded from TOML
///
/// ```toml
/// server_url = "https://dashboards.example.com"
/// api_token = "glsa_..."
/// timeout_secs = 10
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the dashboard server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Bearer token sent with every request (optional)
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the file-level settings came from
    #[serde(skip)]
    pub source: ConfigSource,
}

/// Origin of the values below the environment/CLI overrides
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// No config file found; built-in defaults
    #[default]
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Defaults => f.write_str("built-in defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
            logging: LoggingConfig::default(),
            source: ConfigSource::Defaults,
        }
    }
}

impl ClientConfig {
    /// Parse configuration from TOML text
    ///
    /// Values are not validated here: environment and CLI overrides may still
    /// replace them. [`resolve_client_config`] validates the merged result.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = Self::from_toml_str(&content).map_err(|e| match e {
            Error::Toml(toml_err) => Error::Config(format!("{}: {}", path.display(), toml_err)),
            other => other,
        })?;
        config.source = ConfigSource::File(path.to_path_buf());
        Ok(config)
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject values the HTTP client cannot use
    pub fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "server_url must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file; must exist when given
    pub config_path: Option<PathBuf>,
    pub server_url: Option<String>,
    pub api_token: Option<String>,
}

/// Resolve the effective configuration from all four sources
pub fn resolve_client_config(overrides: &ConfigOverrides) -> Result<ClientConfig> {
    // Priority 3/4: TOML file or compiled defaults
    let mut config = match &overrides.config_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!("Config file not found: {}", path.display())));
            }
            ClientConfig::load_file(path)?
        }
        None => match default_config_path() {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ClientConfig::load_file(&path)?
            }
            None => {
                warn!("No config file found, using built-in defaults");
                ClientConfig::default()
            }
        },
    };

    // Priority 2: Environment variables
    if let Some(url) = non_empty_env(SERVER_URL_ENV) {
        config.server_url = url;
    }
    if let Some(token) = non_empty_env(API_TOKEN_ENV) {
        config.api_token = Some(token);
    }

    // Priority 1: Command-line arguments
    if let Some(url) = &overrides.server_url {
        config.server_url = url.clone();
    }
    if let Some(token) = &overrides.api_token {
        config.api_token = Some(token.clone());
    }

    config.server_url = config.server_url.trim_end_matches('/').to_string();
    config.validate()?;
    Ok(config)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// First existing config file for the platform
///
/// `~/.config/dashprefs/config.toml`, then `/etc/dashprefs/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("dashprefs").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/dashprefs/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
