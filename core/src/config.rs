//! Gateway configuration
//!
//! File-based configuration with environment variable overrides, covering
//! the gateway listen address, the engine endpoint, and the history store
//! connection string. Defaults match the original deployment: gateway on
//! port 5000, engine on port 8000, history database in the working
//! directory.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub gateway: GatewaySettings,
    pub engine: EngineSettings,
    pub store: StoreSettings,
}

/// Listen address of the gateway's HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub host: String,
    pub port: u16,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Upstream analysis engine endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub base_url: String,
    /// Per-request timeout; the gateway performs exactly one attempt
    pub request_timeout_seconds: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// History store backing file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub connection_string: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            connection_string: "codemind_history.db".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration: defaults, then the TOML file if given, then
    /// environment overrides. A missing file at an explicit path is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
                let config: GatewayConfig = toml::from_str(&content)
                    .map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;
                info!("Loaded configuration from {:?}", path);
                config
            }
            None => GatewayConfig::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `CODEMIND_*` environment variable overrides. Values that fail
    /// to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port_str) = std::env::var("CODEMIND_GATEWAY_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => {
                    self.gateway.port = port;
                    debug!("Applied env override for gateway port");
                }
                Err(_) => debug!("Ignoring invalid CODEMIND_GATEWAY_PORT: {}", port_str),
            }
        }

        if let Ok(base_url) = std::env::var("CODEMIND_ENGINE_URL") {
            self.engine.base_url = base_url;
            debug!("Applied env override for engine base URL");
        }

        if let Ok(port_str) = std::env::var("CODEMIND_ENGINE_PORT") {
            match port_str.parse::<u16>() {
                Ok(port) => {
                    self.engine.base_url = format!("http://localhost:{}", port);
                    debug!("Applied env override for engine port");
                }
                Err(_) => debug!("Ignoring invalid CODEMIND_ENGINE_PORT: {}", port_str),
            }
        }

        if let Ok(timeout_str) = std::env::var("CODEMIND_ENGINE_TIMEOUT_SECONDS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => {
                    self.engine.request_timeout_seconds = timeout;
                    debug!("Applied env override for engine request timeout");
                }
                Err(_) => debug!(
                    "Ignoring invalid CODEMIND_ENGINE_TIMEOUT_SECONDS: {}",
                    timeout_str
                ),
            }
        }

        if let Ok(connection_string) = std::env::var("CODEMIND_STORE_CONNECTION") {
            self.store.connection_string = connection_string;
            debug!("Applied env override for store connection string");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_configuration() {
        let config = GatewayConfig::default();
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.engine.base_url, "http://localhost:8000");
        assert_eq!(config.engine.request_timeout_seconds, 30);
        assert_eq!(config.store.connection_string, "codemind_history.db");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[gateway]\nport = 9000\n\n[engine]\nbase_url = \"http://engine:8000\""
        )
        .unwrap();

        let config = GatewayConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.engine.base_url, "http://engine:8000");
        assert_eq!(config.engine.request_timeout_seconds, 30);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = GatewayConfig::load(Some(Path::new("/nonexistent/codemind.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_env_port_is_ignored() {
        let mut config = GatewayConfig::default();
        std::env::set_var("CODEMIND_GATEWAY_PORT", "not-a-port");
        config.apply_env_overrides();
        std::env::remove_var("CODEMIND_GATEWAY_PORT");
        assert_eq!(config.gateway.port, 5000);
    }
}
