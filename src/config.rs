//! Configuration management for Tabrelay
//!
//! Parses TOML configuration files and provides typed access to settings.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    30
}

/// Upstream completion service configuration
///
/// Defaults target the public OpenAI v1 API. `base_url` must not end with a
/// trailing slash; endpoint paths are appended by the upstream client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// Runs in three phases so each failure mode keeps its own context:
    /// file read, TOML parse, then semantic validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            crate::error::AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            }
        })?;

        config.validate().map_err(|e| {
            crate::error::AppError::Config(format!("{}: {}", path_display, e))
        })?;

        Ok(config)
    }

    /// Validate semantic constraints the TOML schema cannot express
    pub fn validate(&self) -> crate::error::AppResult<()> {
        if self.server.request_timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "server.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.server.request_timeout_seconds > 300 {
            return Err(crate::error::AppError::Config(format!(
                "server.request_timeout_seconds cannot exceed 300 seconds, got {}",
                self.server.request_timeout_seconds
            )));
        }

        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(crate::error::AppError::Config(format!(
                "upstream.base_url must start with http:// or https://, got '{}'",
                self.upstream.base_url
            )));
        }
        if self.upstream.base_url.ends_with('/') {
            return Err(crate::error::AppError::Config(format!(
                "upstream.base_url must not end with a trailing slash, got '{}'",
                self.upstream.base_url
            )));
        }

        if self.upstream.model.is_empty() {
            return Err(crate::error::AppError::Config(
                "upstream.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_toml() -> &'static str {
        r#"
[server]
host = "127.0.0.1"
port = 8080
"#
    }

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config: Config = toml::from_str(base_toml()).expect("should parse minimal config");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_seconds, 30);
        assert_eq!(config.upstream.base_url, "https://api.openai.com/v1");
        assert_eq!(config.upstream.model, "gpt-3.5-turbo");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn parses_explicit_upstream_section() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 5000
request_timeout_seconds = 10

[upstream]
base_url = "http://localhost:9000/v1"
model = "test-model"

[observability]
log_level = "debug"
"#;
        let config: Config = toml::from_str(toml).expect("should parse full config");
        assert_eq!(config.server.request_timeout_seconds, 10);
        assert_eq!(config.upstream.base_url, "http://localhost:9000/v1");
        assert_eq!(config.upstream.model, "test-model");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn validate_accepts_defaults() {
        let config: Config = toml::from_str(base_toml()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
request_timeout_seconds = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_excessive_timeout() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
request_timeout_seconds = 301
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_base_url() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[upstream]
base_url = "ftp://example.com/v1"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_trailing_slash_base_url() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[upstream]
base_url = "http://localhost:9000/v1/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_model() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[upstream]
model = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }
}
