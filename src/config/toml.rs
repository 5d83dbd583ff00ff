//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Admin server section
    #[serde(default)]
    pub server: ServerSection,

    /// HTTP client section
    #[serde(default)]
    pub client: ClientSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// Admin server section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Admin API base URL
    pub url: Option<String>,

    /// Bearer token for Authorization header
    pub token: Option<String>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// HTTP client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Request timeout as a duration string
    pub timeout: Option<String>,

    /// Largest document `import` will send, as a byte-size string
    pub max_import_size: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts
    pub max_attempts: Option<CountValue>,

    /// Initial retry delay as a duration string
    pub initial_delay: Option<String>,

    /// Maximum retry delay as a duration string
    pub max_delay: Option<String>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

/// A count written either as a TOML integer or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    /// `max_attempts = 3`
    Number(i64),
    /// `max_attempts = "3"`
    Text(String),
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Confsync Configuration File

[server]
# Admin API base URL (required, can be overridden by --url)
# url = "http://127.0.0.1:3018/api"

# Bearer token for the Authorization header
# token = "your-token-here"

# Extra HTTP headers
# [server.headers]
# X-Custom-Header = "value"

[client]
# Request timeout, a number followed by s, m, h or d (default: "10s")
# timeout = "10s"

# Largest document import will send, e.g. "512kb" or "1.5 mb" (default: "1 mb")
# max_import_size = "1 mb"

[retry]
# Maximum number of attempts when fetching (default: 3)
# Imports are never retried.
# max_attempts = 3

# Initial retry delay (default: "1s")
# initial_delay = "1s"

# Maximum retry delay (default: "10s")
# max_delay = "10s"

# Backoff multiplier (default: 2.0)
# multiplier = 2.0
"#
    .to_string()
}
