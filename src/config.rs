//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dev server configuration (static UI + proxy)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Directory holding the built UI (index.html + wasm bundle)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    5002
}

fn default_static_dir() -> String {
    "billswithfriends-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Backend proxy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_proxy_rules")]
    pub rules: Vec<ProxyRuleConfig>,

    #[serde(default = "default_proxy_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

/// A single prefix → backend forwarding rule
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyRuleConfig {
    pub prefix: String,

    #[serde(default = "default_backend_target")]
    pub target: String,

    #[serde(default = "default_change_origin")]
    pub change_origin: bool,
}

fn default_backend_target() -> String {
    "http://10.206.104.164:8000".to_string()
}

fn default_change_origin() -> bool {
    true
}

fn default_proxy_rules() -> Vec<ProxyRuleConfig> {
    ["/bills", "/friends", "/leaderboard", "/metrics"]
        .into_iter()
        .map(|prefix| ProxyRuleConfig {
            prefix: prefix.to_string(),
            target: default_backend_target(),
            change_origin: default_change_origin(),
        })
        .collect()
}

fn default_proxy_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            rules: default_proxy_rules(),
            request_timeout_secs: default_proxy_timeout(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Backend API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_api_port")]
    pub port: u16,

    /// Maximum upload size for receipt images
    #[serde(default = "default_max_body_size")]
    pub max_upload_size: usize,
}

fn default_api_port() -> u16 {
    8000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_api_port(),
            max_upload_size: default_max_body_size(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Social accountability database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("billswithfriends")
                .join("social.db")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./billswithfriends_social.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("billswithfriends").join("config.toml")),
            Some(PathBuf::from("/etc/billswithfriends/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Dev server overrides
        if let Ok(host) = std::env::var("BWF_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BWF_SERVER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(dir) = std::env::var("BWF_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // A single backend override retargets every proxy rule
        if let Ok(target) = std::env::var("BWF_BACKEND_URL") {
            for rule in &mut self.proxy.rules {
                rule.target = target.clone();
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("BWF_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("BWF_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(db_path) = std::env::var("BWF_DB_PATH") {
            self.storage.db_path = db_path;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("BWF_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BWF_LOG_FORMAT") {
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
    r#"# BillsWithFriends Configuration
#
# Environment variables override these settings:
# - BWF_SERVER_HOST, BWF_SERVER_PORT, BWF_STATIC_DIR
# - BWF_BACKEND_URL (retargets every proxy rule)
# - BWF_API_HOST, BWF_API_PORT
# - BWF_DB_PATH
# - BWF_LOG_LEVEL, BWF_LOG_FORMAT

[server]
# Dev server host and port
host = "0.0.0.0"
port = 5002

# Directory holding the built UI bundle
static_dir = "billswithfriends-ui/dist"

[proxy]
# Upstream request timeout in seconds
request_timeout_secs = 30

# Largest request body forwarded upstream (bytes)
max_body_size = 10485760

# Requests whose path starts with `prefix` are forwarded to `target`.
# With change_origin the Host header is rewritten to the target.
[[proxy.rules]]
prefix = "/bills"
target = "http://10.206.104.164:8000"
change_origin = true

[[proxy.rules]]
prefix = "/friends"
target = "http://10.206.104.164:8000"
change_origin = true

[[proxy.rules]]
prefix = "/leaderboard"
target = "http://10.206.104.164:8000"
change_origin = true

[[proxy.rules]]
prefix = "/metrics"
target = "http://10.206.104.164:8000"
change_origin = true

[api]
# Backend API host and port
host = "0.0.0.0"
port = 8000

# Maximum receipt upload size (bytes)
max_upload_size = 10485760

[storage]
# SQLite database for friends and the leaderboard (":memory:" for ephemeral)
db_path = "~/.local/share/billswithfriends/social.db"

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
    fn test_defaults_match_dev_setup() {
        let config = Config::default();
        assert_eq!(config.server.port, 5002);
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.proxy.rules[0].prefix, "/bills");
        assert_eq!(config.proxy.rules[0].target, "http://10.206.104.164:8000");
        assert!(config.proxy.rules.iter().all(|r| r.change_origin));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:5002");
        assert_eq!(config.proxy.rules.len(), 4);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::parse(
            r#"
            [[proxy.rules]]
            prefix = "/bills"
            target = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.proxy.rules.len(), 1);
        assert!(config.proxy.rules[0].change_origin);
        assert_eq!(config.proxy.request_timeout_secs, 30);
        assert_eq!(config.api.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let err = Config::parse("[server]\nport = \"not a number\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
