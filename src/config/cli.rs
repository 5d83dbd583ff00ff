//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::validate::ValidatorKind;

use super::defaults;

/// Confsync: inspect and replace a server's TOML configuration
///
/// Fetches the stored and effective configuration from the admin API,
/// copies it, and imports replacements.
#[derive(Debug, Parser)]
#[command(name = "confsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Admin API base URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Bearer token for the Authorization header
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Request timeout, e.g. "10s" or "1m"
    #[arg(long, value_name = "DURATION", global = true)]
    pub timeout: Option<String>,

    /// Maximum number of attempts when fetching
    #[arg(long = "retry-max", value_name = "COUNT", global = true)]
    pub retry_max: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for confsync
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the stored configuration
    Show {
        /// Print the configuration with server defaults filled in
        #[arg(long)]
        full: bool,
    },

    /// Report whether the server fills in defaults the stored configuration omits
    Diff,

    /// Copy the stored configuration to stdout or a file
    Copy {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace the server configuration
    Import {
        /// TOML file to import, or '-' for stdin
        file: PathBuf,
    },

    /// Check a value against a format validator
    Check {
        /// Which format to check
        #[arg(value_enum)]
        kind: FormatArg,

        /// Value to check
        value: String,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

/// Validator argument for `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Whole numbers such as "3"
    Count,
    /// Sizes such as "512kb" or "1.5 mb"
    Bytes,
    /// Durations such as "30s" or "2h"
    Duration,
}

impl From<FormatArg> for ValidatorKind {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Count => Self::Count,
            FormatArg::Bytes => Self::ByteSize,
            FormatArg::Duration => Self::Duration,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
