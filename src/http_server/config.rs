//! HTTP Server Configuration
//!
//! Host, port, database location, CORS and log settings. Values come from an
//! optional JSON file, then environment variables, then CLI flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::{CliError, CliResult};
use crate::store::DEFAULT_READ_CONNECTIONS;

/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the database path
pub const DATABASE_ENV: &str = "JOKEBOX_DB";

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite file holding the catalog (default: "joke.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log filter used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,

    /// Pooled read-only connections next to the single writer (default: 4)
    #[serde(default = "default_read_connections")]
    pub read_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("joke.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_read_connections() -> usize {
    DEFAULT_READ_CONNECTIONS
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
            log_json: false,
            read_connections: default_read_connections(),
        }
    }
}

impl HttpServerConfig {
    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Apply `PORT` and `JOKEBOX_DB` from the process environment.
    pub fn apply_env(self) -> CliResult<Self> {
        self.apply_vars(env::var(PORT_ENV).ok(), env::var(DATABASE_ENV).ok())
    }

    fn apply_vars(mut self, port: Option<String>, database: Option<String>) -> CliResult<Self> {
        if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
            self.port = port.trim().parse().map_err(|_| {
                CliError::config_error(format!("Invalid {} value: '{}'", PORT_ENV, port))
            })?;
        }
        if let Some(database) = database.filter(|d| !d.trim().is_empty()) {
            self.database_path = PathBuf::from(database);
        }
        Ok(self)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_path, PathBuf::from("joke.db"));
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.read_connections, DEFAULT_READ_CONNECTIONS);
    }

    #[test]
    fn test_env_overrides() {
        let config = HttpServerConfig::default()
            .apply_vars(Some("8081".to_string()), Some("/tmp/j.db".to_string()))
            .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.database_path, PathBuf::from("/tmp/j.db"));
    }

    #[test]
    fn test_unset_or_empty_env_keeps_defaults() {
        let config = HttpServerConfig::default()
            .apply_vars(Some(String::new()), None)
            .unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port_env() {
        let result = HttpServerConfig::default().apply_vars(Some("abc".to_string()), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jokebox.json");
        fs::write(&path, r#"{"host": "127.0.0.1", "database_path": "x.db"}"#).unwrap();
        let config = HttpServerConfig::load(&path).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
        assert_eq!(config.database_path, PathBuf::from("x.db"));
    }
}
