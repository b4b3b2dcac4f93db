//! Error types for hypernova-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while loading a [`RendererConfig`](crate::RendererConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem error reading the config file.
    #[error("config io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error in a config file, with the file path.
    #[error("failed to parse renderer config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML parse error in an in-memory config string.
    #[error("failed to parse renderer config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The `url` field is empty.
    #[error("renderer config has an empty url")]
    MissingUrl,
}
