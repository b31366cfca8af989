//! Configuration for the biaslens client.
//!
//! Settings live in `.biaslens/config.json` relative to the working
//! directory. Every field has a default, so a missing or partial file
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Directory holding biaslens state, relative to the working directory.
pub const CONFIG_DIR: &str = ".biaslens";

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    Path::new(CONFIG_DIR).join("config.json")
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the bias-detection API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// TCP connection timeout in seconds.
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Per-request timeout in seconds. Bounds how long a request can keep
    /// the client busy.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Maximum number of interaction records kept in memory.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Maximum prompt length in characters; longer input is truncated.
    #[serde(default = "default_prompt_max_chars")]
    pub prompt_max_chars: usize,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_request_timeout_seconds() -> u64 {
    60
}

fn default_history_limit() -> usize {
    100
}

fn default_prompt_max_chars() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            request_timeout_seconds: default_request_timeout_seconds(),
            history_limit: default_history_limit(),
            prompt_max_chars: default_prompt_max_chars(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring unreadable config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// TCP connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Serialize error.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.prompt_max_chars, 500);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api_base_url": "http://10.0.0.1:9000"}"#).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.1:9000");
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".biaslens").join("config.json");

        let mut config = Config::default();
        config.api_base_url = "http://localhost:1234".into();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.api_base_url, "http://localhost:1234");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.json"));
        assert_eq!(config.api_base_url, default_api_base_url());
    }

    #[test]
    fn test_load_or_default_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.history_limit, 100);
    }
}
