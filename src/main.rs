//! Confsync: inspect and replace a server's TOML configuration
//!
//! Entry point for the confsync application.

use confsync::config::{Cli, Command, FormatArg, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use run::Action;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Offline subcommands need no server configuration
    let action = match &cli.command {
        Command::Init { output } => return handle_init(output),
        Command::Check { kind, value } => return handle_check(*kind, value),
        Command::Show { full } => Action::Show { full: *full },
        Command::Diff => Action::Diff,
        Command::Copy { output } => Action::Copy {
            output: output.clone(),
        },
        Command::Import { file } => Action::Import { file: file.clone() },
    };

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(action, config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `check` subcommand.
fn handle_check(kind: FormatArg, value: &str) -> ExitCode {
    match run::describe_value(kind.into(), value) {
        Ok(description) => {
            println!("valid: {description}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs one server action with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(action: Action, config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(action, config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if e.already_notified() {
                tracing::debug!("{e}");
            } else {
                tracing::error!("{e}");
            }
            exit_code::runtime_error()
        }
    }
}
