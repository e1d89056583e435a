//! Error types for vscfg-core

use thiserror::Error;

/// Result type alias using vscfg-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for vscfg
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configured source is unusable
    #[error("Invalid source '{name}': {reason}")]
    InvalidSource { name: String, reason: String },

    /// Home or config directory could not be determined
    #[error("Could not determine {what} directory")]
    NoDirectory { what: &'static str },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid source error
    pub fn invalid_source(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
