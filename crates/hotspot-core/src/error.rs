//! Core error types for hotspot-core.
//!
//! This module defines the error hierarchy using thiserror. Rule-row
//! format problems are local to a single row; configuration problems are
//! fatal; provider problems come from external collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hotspot-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed time or day strings
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Collaborator (places, geocoding, routing) errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised while parsing a single venue rule row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Time string is not a valid "HH:MM" (or the "24:00" special case)
    #[error("invalid time '{input}': {reason}")]
    InvalidTime { input: String, reason: String },

    /// Weekday abbreviation not in Mon..Sun
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    /// Required field is empty
    #[error("missing field '{0}'")]
    MissingField(&'static str),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration or rule table
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration or rule table
    #[error("Failed to parse: {0}")]
    ParseFailed(String),
}

/// Errors surfaced by external collaborators.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Call did not complete within the configured timeout
    #[error("{provider} did not respond within {timeout_secs} seconds")]
    Timeout {
        provider: &'static str,
        timeout_secs: u64,
    },

    /// Transport or protocol failure
    #[error("{provider} failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.message().to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_converts_into_core_error() {
        let err: CoreError = FormatError::UnknownWeekday("Xyz".into()).into();
        assert!(matches!(err, CoreError::Format(_)));
        assert_eq!(err.to_string(), "Format error: unknown weekday 'Xyz'");
    }

    #[test]
    fn timeout_message_names_provider() {
        let err = ProviderError::Timeout {
            provider: "places",
            timeout_secs: 10,
        };
        assert_eq!(err.to_string(), "places did not respond within 10 seconds");
    }
}
