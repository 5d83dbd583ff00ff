//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::FormatError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A count, byte size or duration string has the wrong shape.
    #[error("Invalid {field}: {source}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Validator failure
        #[source]
        source: FormatError,
    },

    /// A well-formed value outside the accepted range.
    #[error("Invalid {field}: {reason}")]
    OutOfRange {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid retry configuration.
    #[error("Invalid retry configuration: {0}")]
    InvalidRetry(String),

    /// Invalid header format.
    #[error("Invalid header format '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// The invalid header string
        value: String,
    },

    /// Invalid header name.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Field names used in error messages.
pub mod field {
    /// The admin API URL.
    pub const URL: &str = "server.url";
    /// The request timeout.
    pub const TIMEOUT: &str = "client.timeout";
    /// The import size limit.
    pub const MAX_IMPORT_SIZE: &str = "client.max_import_size";
    /// The retry attempt limit.
    pub const RETRY_MAX_ATTEMPTS: &str = "retry.max_attempts";
    /// The first retry delay.
    pub const RETRY_INITIAL_DELAY: &str = "retry.initial_delay";
    /// The retry delay cap.
    pub const RETRY_MAX_DELAY: &str = "retry.max_delay";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }

    /// Creates an `InvalidValue` error for a field.
    #[must_use]
    pub const fn invalid_value(field: &'static str, source: FormatError) -> Self {
        Self::InvalidValue { field, source }
    }
}
