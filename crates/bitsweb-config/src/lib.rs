//! Configuration management for bitsweb
//!
//! This module handles loading, validation, and management of
//! bitsweb configuration from YAML files and the process environment.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Environment variable overriding `backend.url`
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
/// Environment variable overriding `backend.api_key`
pub const ENV_API_KEY: &str = "API_KEY";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address. The stored login is shared by every client
    /// that can reach this address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base address of the backend API
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Key sent with every backend request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Header carrying the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Path of the transaction listing, relative to `url`
    #[serde(default = "default_transactions_path")]
    pub transactions_path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            api_key: None,
            api_key_header: default_api_key_header(),
            transactions_path: default_transactions_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_backend_url() -> String {
    "https://bits.travja.dev".to_string()
}

fn default_api_key_header() -> String {
    "X-API-KEY".to_string()
}

fn default_transactions_path() -> String {
    "/transactions".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Reporting window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeConfig {
    /// How many months before today the default window starts
    #[serde(default = "default_months_back")]
    pub months_back: u32,
}

impl Default for DateRangeConfig {
    fn default() -> Self {
        Self {
            months_back: default_months_back(),
        }
    }
}

fn default_months_back() -> u32 {
    6
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Reporting window settings
    #[serde(default)]
    pub date_range: DateRangeConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Read a YAML file. Values are not validated here, since environment
    /// overrides may still replace them.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;
        Self::parse(&content)
    }

    /// Load the file when it exists, fall back to defaults otherwise,
    /// then apply environment overrides and validate.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        Self::load_or_default_with(path, |name| std::env::var(name).ok())
    }

    /// `load_or_default` with overrides taken from `lookup`
    pub fn load_or_default_with<F>(path: &Path, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() { Self::load(path)? } else { Config::default() };
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })
    }

    /// Apply `BACKEND_URL` and `API_KEY` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            log::debug!("Backend URL overridden by {}", ENV_BACKEND_URL);
            self.backend.url = url.trim().to_string();
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            log::debug!("API key overridden by {}", ENV_API_KEY);
            self.backend.api_key = Some(key);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let url = self.backend.url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.url".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.url".to_string(),
                reason: format!("Expected an http:// or https:// address, got '{}'", url),
            });
        }

        if self.backend.api_key_header.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.api_key_header".to_string(),
            });
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if !(1..=120).contains(&self.date_range.months_back) {
            return Err(ConfigError::InvalidValue {
                field: "date_range.months_back".to_string(),
                reason: "Months back must be between 1 and 120".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full URL of the transaction listing
    pub fn transactions_url(&self) -> String {
        format!(
            "{}/{}",
            self.backend.url.trim_end_matches('/'),
            self.backend.transactions_path.trim_start_matches('/')
        )
    }

    /// Whether the server only listens on a loopback address
    pub fn is_local_only(&self) -> bool {
        let host = self.server.host.trim();
        match host.parse::<std::net::IpAddr>() {
            Ok(ip) => ip.is_loopback(),
            Err(_) => host.eq_ignore_ascii_case("localhost"),
        }
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Default config path used by the binary
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yaml")
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.url, "https://bits.travja.dev");
        assert_eq!(config.backend.api_key, None);
        assert_eq!(config.date_range.months_back, 6);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.backend.api_key_header, "X-API-KEY");
        assert_eq!(config.backend.transactions_path, "/transactions");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("backend:\n  url: http://localhost:8080\n").unwrap();
        assert_eq!(config.backend.url, "http://localhost:8080");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("server: [unterminated");
        assert!(matches!(result, Err(ConfigError::InvalidYaml { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.url = "ftp://example.com".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidValue);

        let mut config = Config::default();
        config.backend.url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::MissingField);

        let mut config = Config::default();
        config.date_range.months_back = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BACKEND_URL, "http://localhost:8080"),
            (ENV_API_KEY, "secret"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.backend.url, "http://localhost:8080");
        assert_eq!(config.backend.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config.backend.url, "https://bits.travja.dev");
        assert_eq!(config.backend.api_key, None);
    }

    #[test]
    fn test_transactions_url_joins_slashes() {
        let mut config = Config::default();
        config.backend.url = "http://localhost:8080/".to_string();
        config.backend.transactions_path = "/transactions".to_string();
        assert_eq!(config.transactions_url(), "http://localhost:8080/transactions");

        config.backend.transactions_path = "api/tx".to_string();
        assert_eq!(config.transactions_url(), "http://localhost:8080/api/tx");
    }

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bitsweb-{}-{}.yaml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_env_url_fills_empty_file_value() {
        let path = write_temp_config("empty-url", "backend:\n  url: \"\"\n");
        let config = Config::load_or_default_with(&path, |name| {
            (name == ENV_BACKEND_URL).then(|| "http://localhost:8080".to_string())
        })
        .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.backend.url, "http://localhost:8080");
    }

    #[test]
    fn test_empty_file_url_without_env_is_rejected() {
        let path = write_temp_config("empty-url-no-env", "backend:\n  url: \"\"\n");
        let result = Config::load_or_default_with(&path, |_| None);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults_and_overrides() {
        let config = Config::load_or_default_with(Path::new("/definitely/not/here.yaml"), |name| {
            (name == ENV_API_KEY).then(|| "secret".to_string())
        })
        .unwrap();
        assert_eq!(config.backend.url, "https://bits.travja.dev");
        assert_eq!(config.backend.api_key.as_deref(), Some("secret"));
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_is_local_only() {
        let mut config = Config::default();
        assert!(config.is_local_only());
        config.server.host = "localhost".to_string();
        assert!(config.is_local_only());
        config.server.host = "::1".to_string();
        assert!(config.is_local_only());
        config.server.host = "0.0.0.0".to_string();
        assert!(!config.is_local_only());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
