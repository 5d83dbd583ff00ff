//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use url::Url;

use crate::transport::RetryPolicy;
use crate::validate::{parse_byte_size, parse_count, parse_duration};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{CountValue, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config,
/// or [`ValidatedConfig::load`] to also locate and read the settings file.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Admin API base URL (required)
    pub url: Url,

    /// Headers sent with every request, including `Authorization`
    pub headers: HeaderMap,

    /// Per-request timeout
    pub timeout: Duration,

    /// Largest document accepted for import, in bytes
    pub max_import_size: u64,

    /// Retry policy for fetches
    pub retry_policy: RetryPolicy,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ url: {}, timeout: {}s, max_import_size: {} bytes, retry: {}x/{}s, \
             headers: {} }}",
            self.url,
            self.timeout.as_secs(),
            self.max_import_size,
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_secs(),
            self.headers.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing or invalid
    /// - A count, byte size or duration string is malformed or zero
    /// - The retry settings are inconsistent
    /// - Header format is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;
        let headers = Self::resolve_headers(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let max_import_size = Self::resolve_max_import_size(toml)?;
        let retry_policy = Self::build_retry_policy(cli, toml)?;

        Ok(Self {
            url,
            headers,
            timeout,
            max_import_size,
            retry_policy,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and the settings file.
    ///
    /// Reads `cli.config` if set, otherwise [`defaults::config_path`] when
    /// that file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_fallback(cli, defaults::config_path())
    }

    /// Like [`load`](Self::load), with an explicit fallback settings path.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_fallback(cli: &Cli, fallback: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| fallback.filter(|p| p.is_file()));

        let toml = match path {
            Some(path) => {
                tracing::debug!("Reading settings from {}", path.display());
                Some(TomlConfig::load(&path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.server.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set server.url in config file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so CLI values replace them
        if let Some(toml) = toml {
            for (name, value) in &toml.server.headers {
                headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            headers.insert(parse_header_name(&name)?, parse_header_value(&name, &value)?);
        }

        let token = cli
            .token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.server.token.as_deref()));

        if let Some(token) = token {
            let mut value = parse_header_value("Authorization", &format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let value = cli
            .timeout
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.timeout.as_deref()));

        let timeout = parse_duration_field(field::TIMEOUT, value)?.unwrap_or(defaults::timeout());
        if timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(timeout)
    }

    fn resolve_max_import_size(toml: Option<&TomlConfig>) -> Result<u64, ConfigError> {
        let Some(value) = toml.and_then(|t| t.client.max_import_size.as_deref()) else {
            return Ok(defaults::MAX_IMPORT_SIZE);
        };

        let size = parse_byte_size(value)
            .map_err(|e| ConfigError::invalid_value(field::MAX_IMPORT_SIZE, e))?
            .unwrap_or(defaults::MAX_IMPORT_SIZE);

        if size == 0 {
            return Err(ConfigError::OutOfRange {
                field: field::MAX_IMPORT_SIZE,
                reason: "must be greater than 0 bytes".to_string(),
            });
        }

        Ok(size)
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = match cli.retry_max.as_deref() {
            Some(text) => parse_count_text(text)?,
            None => match retry.and_then(|r| r.max_attempts.as_ref()) {
                Some(CountValue::Text(text)) => parse_count_text(text)?,
                Some(CountValue::Number(n)) => Some(u64::try_from(*n).map_err(|_| {
                    ConfigError::InvalidRetry(format!("max_attempts must not be negative, got {n}"))
                })?),
                None => None,
            },
        };
        let max_attempts = max_attempts.map_or(Ok(defaults::RETRY_MAX_ATTEMPTS), |n| {
            u32::try_from(n).map_err(|_| ConfigError::OutOfRange {
                field: field::RETRY_MAX_ATTEMPTS,
                reason: format!("{n} is too large"),
            })
        })?;

        let initial_delay = parse_duration_field(
            field::RETRY_INITIAL_DELAY,
            retry.and_then(|r| r.initial_delay.as_deref()),
        )?
        .unwrap_or(defaults::retry_initial_delay());

        let max_delay = parse_duration_field(
            field::RETRY_MAX_DELAY,
            retry.and_then(|r| r.max_delay.as_deref()),
        )?
        .unwrap_or(defaults::retry_max_delay());

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay.is_zero() {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay < initial_delay {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({}s) must be >= initial_delay ({}s)",
                max_delay.as_secs(),
                initial_delay.as_secs()
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(initial_delay)
            .with_max_delay(max_delay)
            .with_multiplier(multiplier))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_duration_field(
    name: &'static str,
    value: Option<&str>,
) -> Result<Option<Duration>, ConfigError> {
    value.map_or(Ok(None), |v| {
        parse_duration(v).map_err(|e| ConfigError::invalid_value(name, e))
    })
}

fn parse_count_text(value: &str) -> Result<Option<u64>, ConfigError> {
    parse_count(value).map_err(|e| ConfigError::invalid_value(field::RETRY_MAX_ATTEMPTS, e))
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // "Key=Value" first, then "Key: Value"
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
