//! # API Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     INVENTA_DATA_DIR=/srv/inventa                                       │
//! │     INVENTA_HTTP_PORT=8080                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     $INVENTA_CONFIG, or                                                 │
//! │     ~/.config/inventa/api.toml (Linux)                                  │
//! │     ~/Library/Application Support/cl.inventa.inventa/api.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     ./data, 0.0.0.0:8000, 50 import errors                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # api.toml
//! data_dir = "/srv/inventa"
//! bind_addr = "127.0.0.1"
//! http_port = 8000
//! import_error_limit = 50
//! ```

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use inventa_core::import::DEFAULT_ERROR_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "INVENTA_CONFIG";

const DATA_DIR_ENV: &str = "INVENTA_DATA_DIR";
const BIND_ADDR_ENV: &str = "INVENTA_BIND_ADDR";
const HTTP_PORT_ENV: &str = "INVENTA_HTTP_PORT";
const IMPORT_ERROR_LIMIT_ENV: &str = "INVENTA_IMPORT_ERROR_LIMIT";

// =============================================================================
// API Configuration
// =============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Directory holding `empresas.json`, `productos.json` and `ventas.json`.
    pub data_dir: PathBuf,

    /// Bind address (default: 0.0.0.0 for all interfaces).
    pub bind_addr: String,

    /// HTTP port.
    pub http_port: u16,

    /// Maximum row errors returned by a bulk import.
    pub import_error_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            data_dir: PathBuf::from("./data"),
            bind_addr: "0.0.0.0".to_string(),
            http_port: 8000,
            import_error_limit: DEFAULT_ERROR_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from all sources.
    ///
    /// ## Loading Order
    /// 1. Defaults
    /// 2. TOML file, when one exists
    /// 3. Environment overrides
    /// 4. Validation
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config file");
                let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                ApiConfig::from_toml(&contents)?
            }
            _ => {
                debug!("No config file, using defaults");
                ApiConfig::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies `INVENTA_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = addr;
        }
        if let Some(port) = lookup(HTTP_PORT_ENV) {
            self.http_port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(HTTP_PORT_ENV.to_string()))?;
        }
        if let Some(limit) = lookup(IMPORT_ERROR_LIMIT_ENV) {
            self.import_error_limit = limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(IMPORT_ERROR_LIMIT_ENV.to_string()))?;
        }
        Ok(())
    }

    /// Rejects values the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("data_dir".to_string()));
        }
        if self.bind_addr.trim().is_empty() {
            return Err(ConfigError::InvalidValue("bind_addr".to_string()));
        }
        if self.http_port == 0 {
            return Err(ConfigError::InvalidValue("http_port".to_string()));
        }
        if self.import_error_limit == 0 {
            return Err(ConfigError::InvalidValue("import_error_limit".to_string()));
        }
        Ok(())
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

/// Explicit `INVENTA_CONFIG` path, else `api.toml` in the platform config dir.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("cl", "inventa", "inventa").map(|dirs| dirs.config_dir().join("api.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.import_error_limit, 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ApiConfig::from_toml("http_port = 9000\n").unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ApiConfig::from_toml("http_port = \"muchos\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config =
            ApiConfig::from_toml("data_dir = \"/from/file\"\nhttp_port = 9000").unwrap();
        config
            .apply_overrides(env_of(&[
                ("INVENTA_DATA_DIR", "/from/env"),
                ("INVENTA_IMPORT_ERROR_LIMIT", "10"),
            ]))
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.import_error_limit, 10);
    }

    #[test]
    fn test_unparseable_env_value() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_overrides(env_of(&[("INVENTA_HTTP_PORT", "ochenta")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for INVENTA_HTTP_PORT");
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let mut config = ApiConfig::default();
        config.http_port = 0;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.import_error_limit = 0;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.data_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
