use std::io;

use thiserror::Error;

/// Result type used across the Mandala core crate.
pub type Result<T> = std::result::Result<T, MandalaError>;

/// Canonical error representation shared by all members.
#[derive(Debug, Error)]
pub enum MandalaError {
    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("layout error: {0}")]
    LayoutError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {source}")]
    InvalidEnvVar {
        key: String,
        #[source]
        source: std::env::VarError,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("cannot read config file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ConfigError> for MandalaError {
    fn from(value: ConfigError) -> Self {
        MandalaError::ConfigError(value.to_string())
    }
}
