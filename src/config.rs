//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::DashboardConfig;
use crate::gateway::GatewayConfig;
use crate::pipeline::PipelineConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("foresight").join("config.toml")),
            Some(PathBuf::from("/etc/foresight/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from the first default location that exists, or environment only
    ///
    /// Returns the path the config came from. A file that exists but fails to
    /// load is an error, not a silent fallback.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    fn load_first(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Gateway overrides
        if let Some(url) = lookup("FORESIGHT_API_URL") {
            self.gateway.base_url = url;
        }

        // Dashboard overrides
        if let Some(host) = lookup("FORESIGHT_HOST") {
            self.dashboard.host = host;
        }
        if let Some(port) = lookup("FORESIGHT_PORT") {
            if let Ok(p) = port.parse() {
                self.dashboard.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("FORESIGHT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FORESIGHT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Foresight Configuration
#
# Environment variables override these settings:
# - FORESIGHT_API_URL
# - FORESIGHT_HOST
# - FORESIGHT_PORT
# - FORESIGHT_LOG_LEVEL
# - FORESIGHT_LOG_FORMAT

[gateway]
# News backend base URL
base_url = "http://localhost:8000"

# Per-request timeout (ms)
request_timeout_ms = 10000

[dashboard]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 8084

[pipeline]
# Headlines requested when the dashboard opens
current_limit = 10

# Projections requested per generation
future_limit = 5

# Simulated latency before mock data appears when the backend is offline (ms)
current_mock_delay_ms = 1500
future_mock_delay_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
