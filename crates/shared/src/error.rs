//! Error types for configuration loading

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting '{key}'")]
    Missing { key: &'static str },

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
