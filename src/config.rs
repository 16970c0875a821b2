//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub leetcode: LeetCodeConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("leetbro").to_string_lossy().to_string())
        .unwrap_or_else(|| "./leetbro_data".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// LeetCode stats API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LeetCodeConfig {
    #[serde(default = "default_stats_url")]
    pub stats_url: String,

    #[serde(default = "default_stats_timeout")]
    pub request_timeout_ms: u64,
}

fn default_stats_url() -> String {
    "https://leetcode-stats-api.herokuapp.com".to_string()
}

fn default_stats_timeout() -> u64 {
    10_000
}

impl Default for LeetCodeConfig {
    fn default() -> Self {
        Self {
            stats_url: default_stats_url(),
            request_timeout_ms: default_stats_timeout(),
        }
    }
}

/// Leaderboard sync configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_minutes: u64,

    #[serde(default)]
    pub background_enabled: bool,
}

fn default_refresh_interval() -> u64 {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: default_refresh_interval(),
            background_enabled: false,
        }
    }
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("leetbro").join("config.toml")),
            Some(PathBuf::from("/etc/leetbro/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Store overrides
        if let Ok(data_dir) = std::env::var("LEETBRO_DATA_DIR") {
            self.store.data_dir = data_dir;
        }

        // API overrides
        if let Ok(host) = std::env::var("LEETBRO_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("LEETBRO_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Stats API overrides
        if let Ok(url) = std::env::var("LEETBRO_STATS_URL") {
            self.leetcode.stats_url = url;
        }

        // Sync overrides
        if let Ok(interval) = std::env::var("LEETBRO_SYNC_INTERVAL_MINUTES") {
            if let Ok(minutes) = interval.parse() {
                self.sync.refresh_interval_minutes = minutes;
            }
        }
        if let Ok(enabled) = std::env::var("LEETBRO_SYNC_ENABLED") {
            if let Ok(flag) = enabled.parse() {
                self.sync.background_enabled = flag;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("LEETBRO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LEETBRO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            api: ApiConfig::default(),
            leetcode: LeetCodeConfig::default(),
            sync: SyncConfig::default(),
            logging: LoggingConfig::default(),
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
    r#"# LeetBro Configuration
#
# Environment variables override these settings:
# - LEETBRO_DATA_DIR
# - LEETBRO_API_HOST
# - LEETBRO_API_PORT
# - LEETBRO_STATS_URL
# - LEETBRO_SYNC_INTERVAL_MINUTES
# - LEETBRO_SYNC_ENABLED
# - LEETBRO_LOG_LEVEL
# - LEETBRO_LOG_FORMAT

[store]
# Directory for the SQLite database
data_dir = "~/.local/share/leetbro"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8080

# Request timeout in seconds
request_timeout_secs = 30

[leetcode]
# Base URL of the LeetCode stats API
stats_url = "https://leetcode-stats-api.herokuapp.com"

# Per-request timeout (ms)
request_timeout_ms = 10000

[sync]
# How often the background refresh runs (minutes)
refresh_interval_minutes = 30

# Enable automatic background refresh
background_enabled = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.sync.refresh_interval_minutes, 30);
        assert!(!config.sync.background_enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let content = generate_default_config();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(
            config.leetcode.stats_url,
            "https://leetcode-stats-api.herokuapp.com"
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.sync.refresh_interval_minutes, 30);
    }
}
