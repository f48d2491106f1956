//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::query::ActiveStation;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub observations: ObservationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset location and access settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

fn default_database_path() -> String {
    "Resources/hawaii.sqlite".to_string()
}

fn default_busy_timeout() -> u64 {
    5000 // 5 seconds
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            busy_timeout_ms: default_busy_timeout(),
        }
    }
}

impl StoreConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Settings for the `/tobs` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsConfig {
    /// A station id to pin, or "computed" to pick the station with the most rows
    #[serde(default = "default_active_station")]
    pub active_station: String,
}

fn default_active_station() -> String {
    ActiveStation::default().to_string()
}

impl Default for ObservationsConfig {
    fn default() -> Self {
        Self {
            active_station: default_active_station(),
        }
    }
}

impl ObservationsConfig {
    pub fn active_station(&self) -> ActiveStation {
        self.active_station.parse().unwrap_or_default()
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

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("surfsup").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/surfsup/config.toml"));
        paths.push(PathBuf::from("./config.toml"));
        paths
    }

    /// First config file that exists among `paths`.
    ///
    /// The file is returned even if it is malformed, so loading it
    /// reports the error rather than falling back to defaults.
    pub fn find(paths: &[PathBuf]) -> Option<PathBuf> {
        paths.iter().find(|path| path.exists()).cloned()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `SURFSUP_*` overrides read through `var`
    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("SURFSUP_DATABASE") {
            self.store.database_path = path;
        }

        if let Some(host) = var("SURFSUP_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("SURFSUP_API_PORT") {
            self.api.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "SURFSUP_API_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(station) = var("SURFSUP_ACTIVE_STATION") {
            self.observations.active_station = station;
        }

        if let Some(level) = var("SURFSUP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SURFSUP_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SurfsUp Configuration
#
# Environment variables override these settings:
# - SURFSUP_DATABASE
# - SURFSUP_API_HOST
# - SURFSUP_API_PORT
# - SURFSUP_ACTIVE_STATION
# - SURFSUP_LOG_LEVEL
# - SURFSUP_LOG_FORMAT

[store]
# Path to the Hawaii climate SQLite dataset (opened read-only)
database_path = "Resources/hawaii.sqlite"

# How long to wait on a locked database file (ms)
busy_timeout_ms = 5000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[observations]
# Station reported by /api/v1.0/tobs.
# A station id pins it; "computed" picks the station with the most measurements.
active_station = "USC00519281"

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
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.store.database_path, "Resources/hawaii.sqlite");
        assert_eq!(config.api.addr(), "0.0.0.0:5000");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(
            config.observations.active_station(),
            ActiveStation::Pinned("USC00519281".to_string())
        );
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            Path::new("partial.toml"),
            r#"
            [api]
            port = 8080

            [observations]
            active_station = "computed"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.store.busy_timeout_ms, 5000);
        assert_eq!(config.observations.active_station(), ActiveStation::Computed);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(Path::new("default.toml"), &generate_default_config()).unwrap();

        assert_eq!(config.api.port, 5000);
        assert!(config.api.cors_origins.is_empty());
        assert_eq!(config.observations.active_station, "USC00519281");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let err = Config::parse(Path::new("broken.toml"), "[api\nport = ").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/surfsup.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_in_search_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[api\nport = ").unwrap();

        let found = Config::find(&[missing, broken.clone()]).unwrap();
        assert_eq!(found, broken);

        let err = Config::load_with_env(&found).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_find_without_files() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::find(&[dir.path().join("none.toml")]), None);
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config
            .apply_overrides(|name| (name == "SURFSUP_API_PORT").then(|| "8080".to_string()))
            .unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_port_override_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|name| (name == "SURFSUP_API_PORT").then(|| "eighty".to_string()))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidEnv { name: "SURFSUP_API_PORT", .. }
        ));
        assert!(err.to_string().contains("eighty"));
        assert_eq!(config.api.port, 5000);
    }

    #[test]
    fn test_env_overrides() {
        let vars: std::collections::HashMap<&str, &str> = [
            ("SURFSUP_DATABASE", "/data/hawaii.sqlite"),
            ("SURFSUP_API_HOST", "127.0.0.1"),
            ("SURFSUP_ACTIVE_STATION", "computed"),
            ("SURFSUP_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.store.database_path, "/data/hawaii.sqlite");
        assert_eq!(config.api.addr(), "127.0.0.1:5000");
        assert_eq!(config.observations.active_station(), ActiveStation::Computed);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
