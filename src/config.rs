//! Configuration module for retromail.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, RetromailError};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (empty means permissive dev mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Shared secret used to verify identity-provider tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            jwt_secret: String::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/retromail.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Auto-provisioning configuration for first-time callers.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionConfig {
    /// Domain assigned to auto-provisioned addresses.
    #[serde(default = "default_provision_domain")]
    pub domain: String,
    /// Cap on username suffix probing before giving up.
    #[serde(default = "default_provision_attempts")]
    pub max_attempts: usize,
}

fn default_provision_domain() -> String {
    "mail.local".to_string()
}

fn default_provision_attempts() -> usize {
    100
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            domain: default_provision_domain(),
            max_attempts: default_provision_attempts(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/retromail.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Web server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Auto-provisioning settings.
    #[serde(default)]
    pub provision: ProvisionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RetromailError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RetromailError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `RETROMAIL_JWT_SECRET`: Override the token verification secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("RETROMAIL_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.server.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the token verification secret is not set.
    pub fn validate(&self) -> Result<()> {
        if self.server.jwt_secret.is_empty() {
            return Err(RetromailError::Config(
                "jwt_secret is not set. Set it in config.toml or via \
                 RETROMAIL_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.jwt_secret.is_empty());
        assert_eq!(config.database.path, "data/retromail.db");
        assert_eq!(config.provision.domain, "mail.local");
        assert_eq!(config.provision.max_attempts, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9090
            cors_origins = ["http://localhost:3000"]
            jwt_secret = "test-secret-key"

            [database]
            path = "test/mail.db"

            [provision]
            domain = "example.test"
            max_attempts = 10

            [logging]
            level = "debug"
            file = "test/retromail.log"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.cors_origins.len(), 1);
        assert_eq!(config.server.jwt_secret, "test-secret-key");
        assert_eq!(config.database.path, "test/mail.db");
        assert_eq!(config.provision.domain, "example.test");
        assert_eq!(config.provision.max_attempts, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml = r#"
            [server]
            port = 3001
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.provision.domain, "mail.local");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("not [valid toml");
        assert!(matches!(result, Err(RetromailError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\njwt_secret = \"from-file\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.jwt_secret, "from-file");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("nonexistent/config.toml");
        assert!(matches!(result, Err(RetromailError::Io(_))));
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.jwt_secret = "secret".to_string();
        assert!(config.validate().is_ok());
    }
}
