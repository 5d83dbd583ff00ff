//! Configuration layer for confsync.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - `--config`, or `<config dir>/confsync/config.toml` if present
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Headers merge: TOML headers are applied first and CLI headers with the
//! same name replace them. The token always becomes `Authorization: Bearer`.
//!
//! # Value Formats
//!
//! Durations (`timeout`, `retry.*_delay`), byte sizes (`max_import_size`)
//! and counts (`retry.max_attempts`) are strings checked by the
//! [`validate`](crate::validate) module. An empty string means "use the
//! default".
//!
//! # TOML-Only Options
//!
//! - `client.max_import_size` (default: 1 mb)
//! - `retry.initial_delay` (default: 1s)
//! - `retry.max_delay` (default: 10s)
//! - `retry.multiplier` (default: 2.0)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FormatArg};
pub use error::{ConfigError, field};
pub use toml::{CountValue, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
