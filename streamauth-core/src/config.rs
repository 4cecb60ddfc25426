use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Settings read by the credential gateway on every call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Resource URL handed back to authenticated publisher and websocket
    /// clients. Echoed verbatim, so an empty string is a valid value.
    pub url_resource: String,
    /// Read and log the `token` field of validation requests
    pub use_token: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
    /// Emit the per-request credential events
    pub show_credentials: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
            show_credentials: true,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(Error::ConfigFileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(File::from(path));
        }

        // STREAMAUTH_SERVER__PORT, STREAMAUTH_GATEWAY__URL_RESOURCE, ...
        builder = builder.add_source(
            Environment::with_prefix("STREAMAUTH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path.as_ref()))
    }

    /// Get HTTP listen address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Check the configuration, collecting every problem instead of
    /// stopping at the first one.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.port == 0 {
            errors.push("server.port must be between 1 and 65535".to_string());
        }

        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "warning" | "error"
        ) {
            errors.push(format!("logging.level '{}' is not a valid level", self.logging.level));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format '{}' must be 'json' or 'pretty'",
                self.logging.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 3000);
        assert!(config.gateway.url_resource.is_empty());
        assert!(!config.gateway.use_token);
        assert!(config.logging.show_credentials);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8088,
            },
            ..Config::default()
        };

        assert_eq!(config.http_address(), "127.0.0.1:8088");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = Config {
            server: ServerConfig {
                host: " ".to_string(),
                port: 0,
            },
            gateway: GatewayConfig::default(),
            logging: LoggingConfig {
                level: "loud".to_string(),
                format: "xml".to_string(),
                file_path: None,
                show_credentials: true,
            },
        };

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("server.port")));
        assert!(errors.iter().any(|e| e.contains("logging.format")));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 4100\ngateway:\n  url_resource: \"rtmp://edge.example.com/live\"\n  use_token: true"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.server.port, 4100);
        // untouched sections keep their defaults
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.gateway.url_resource, "rtmp://edge.example.com/live");
        assert!(config.gateway.use_token);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::from_file("/nonexistent/streamauth.yaml");
        assert!(matches!(result, Err(Error::ConfigFileNotFound(_))));
    }
}
