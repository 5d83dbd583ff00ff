//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice; runs `show`
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["confsync"];
    full_args.extend(args);
    full_args.push("show");
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// CLI args with only a valid URL
fn with_url(extra: &[&str]) -> Cli {
    let mut args = vec!["--url", "http://127.0.0.1:3018/api"];
    args.extend(extra);
    cli(&args)
}
