//! Renderer configuration, loadable from YAML.
//!
//! ```yaml
//! url: http://localhost:3030/batch
//! connect_timeout_ms: 500
//! timeout_ms: 2000
//! user_agent: my-app/1.0
//! ```
//!
//! Timeouts are optional. Without them the exchange waits as long as the
//! service takes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::transport::TransportSettings;

/// Endpoint and transport settings for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Batch endpoint of the rendering service.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl RendererConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout_ms: None,
            timeout_ms: None,
            user_agent: None,
        }
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: RendererConfig = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Load a config from a YAML file.
    ///
    /// Returns `ConfigError::Parse` (with path) if the file is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RendererConfig =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validated()
    }

    /// Transport settings derived from this config.
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            timeout: self.timeout_ms.map(Duration::from_millis),
            user_agent: self.user_agent.clone(),
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        Ok(self)
    }
}
