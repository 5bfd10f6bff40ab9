//! Error types for lockdiff
//!
//! None of the resolution errors are fatal: fetchers downgrade them to
//! "nothing found" at their boundary. Only configuration loading surfaces
//! errors to the user.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LockdiffError
pub type Result<T> = std::result::Result<T, LockdiffError>;

/// Main error type for lockdiff operations
#[derive(Debug, Error)]
pub enum LockdiffError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Fetch-related errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Parse-related errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Version cannot be decomposed into numeric components
    #[error("Invalid version: '{0}'")]
    InvalidVersion(String),
}

/// Errors raised while retrieving release documentation
#[derive(Debug, Error)]
pub enum FetchError {
    /// Resource does not exist (HTTP 404 or missing file)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource exists but has no content
    #[error("Empty body: {0}")]
    EmptyBody(String),

    /// Non-success HTTP status other than 404
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Whether this error only means "nothing there"
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::EmptyBody(_) => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Self::Status { .. } | Self::Transport(_) => false,
        }
    }
}

/// Errors raised while interpreting fetched content
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON payload could not be decoded
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
