//! Application execution logic.
//!
//! Builds the transport and controller from validated config and runs one
//! subcommand against the admin server.

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use confsync::classify::{ActionReporter, TracingReporter};
use confsync::config::ValidatedConfig;
use confsync::controller::{
    Clipboard, ClipboardError, ConfigController, ConsoleNotifier, CopyOutcome, FileClipboard,
    ImportOutcome, MountOutcome, Notifier, StdoutClipboard,
};
use confsync::store::ConfigStore;
use confsync::transport::{ConfigTransport, HttpTransport, ReqwestClient};
use confsync::validate::{FormatError, ValidatorKind, parse_byte_size, parse_count, parse_duration};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Transport used by the binary.
type AppTransport = HttpTransport<ReqwestClient>;

/// Draft path that means "read stdin".
const STDIN_PATH: &str = "-";

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Failed to read the document to import.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadDraft {
        /// Where the draft was read from (`-` for stdin)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write command output.
    #[error("Failed to write output: {0}")]
    Output(#[source] ClipboardError),

    /// Loading the configuration failed.
    #[error("Fetching configuration failed: {0}")]
    Fetch(String),

    /// Copying the configuration failed.
    #[error("Copying configuration failed: {0}")]
    Copy(String),

    /// The server rejected the import.
    #[error("Importing configuration failed: {0}")]
    Import(String),
}

impl RunError {
    /// Returns true if the controller already showed this failure to the user.
    #[must_use]
    pub const fn already_notified(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Copy(_) | Self::Import(_))
    }
}

/// A subcommand that talks to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the original or full text.
    Show {
        /// Print the full text
        full: bool,
    },
    /// Report whether defaults are filled in.
    Diff,
    /// Copy the original text to stdout or a file.
    Copy {
        /// Target file; stdout when `None`
        output: Option<PathBuf>,
    },
    /// Import a document read from a file or stdin.
    Import {
        /// Source file, or `-`
        file: PathBuf,
    },
}

/// Executes one action against the configured server.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the draft cannot
/// be read, or the action fails.
///
/// # Coverage Note
///
/// Excluded from coverage because it requires a live server.
#[cfg(not(tarpaulin_include))]
pub async fn execute(action: Action, config: ValidatedConfig) -> Result<(), RunError> {
    let store = ConfigStore::new(build_transport(&config)?)
        .with_max_import_size(config.max_import_size);

    match action {
        Action::Show { full } => show(&controller(store, StdoutClipboard), full, &StdoutClipboard).await,
        Action::Diff => diff(&controller(store, StdoutClipboard), &StdoutClipboard).await,
        Action::Copy { output: Some(path) } => copy(&controller(store, FileClipboard::new(path))).await,
        Action::Copy { output: None } => copy(&controller(store, StdoutClipboard)).await,
        Action::Import { file } => {
            let draft = read_draft(&file)?;
            import(&controller(store, StdoutClipboard), &draft).await
        }
    }
}

/// Builds the HTTP transport from config.
///
/// # Errors
///
/// Returns [`RunError::ClientBuild`] if the reqwest client cannot be created.
fn build_transport(config: &ValidatedConfig) -> Result<AppTransport, RunError> {
    let client = ReqwestClient::with_timeout(config.timeout).map_err(RunError::ClientBuild)?;

    Ok(HttpTransport::new(client, config.url.clone())
        .with_headers(config.headers.clone())
        .with_retry_policy(config.retry_policy.clone()))
}

fn controller<C: Clipboard>(
    store: ConfigStore<AppTransport>,
    clipboard: C,
) -> ConfigController<AppTransport, ConsoleNotifier, C, TracingReporter> {
    ConfigController::new(store, ConsoleNotifier, clipboard, TracingReporter)
}

async fn mount<T, N, C, R>(controller: &ConfigController<T, N, C, R>) -> Result<(), RunError>
where
    T: ConfigTransport,
    N: Notifier,
    C: Clipboard,
    R: ActionReporter,
{
    match controller.mount().await {
        MountOutcome::Loaded | MountOutcome::AlreadyMounted => Ok(()),
        MountOutcome::Failed(message) => Err(RunError::Fetch(message)),
    }
}

/// Prints the original or full text to `out`.
async fn show<T, N, C, R>(
    controller: &ConfigController<T, N, C, R>,
    full: bool,
    out: &impl Clipboard,
) -> Result<(), RunError>
where
    T: ConfigTransport,
    N: Notifier,
    C: Clipboard,
    R: ActionReporter,
{
    mount(controller).await?;

    let view = controller.views().await;
    let text = if full { &view.full } else { &view.original };
    out.write_text(text).map_err(RunError::Output)
}

/// Reports to `out` whether the server fills in defaults.
async fn diff<T, N, C, R>(
    controller: &ConfigController<T, N, C, R>,
    out: &impl Clipboard,
) -> Result<(), RunError>
where
    T: ConfigTransport,
    N: Notifier,
    C: Clipboard,
    R: ActionReporter,
{
    mount(controller).await?;

    let message = if controller.store().await.has_implicit_defaults() {
        "The full configuration differs: the server fills in defaults (see 'show --full')"
    } else {
        "The full configuration is identical to the stored configuration"
    };
    out.write_text(message).map_err(RunError::Output)
}

async fn copy<T, N, C, R>(controller: &ConfigController<T, N, C, R>) -> Result<(), RunError>
where
    T: ConfigTransport,
    N: Notifier,
    C: Clipboard,
    R: ActionReporter,
{
    mount(controller).await?;

    match controller.copy_original().await {
        CopyOutcome::Copied => Ok(()),
        CopyOutcome::Failed(message) => Err(RunError::Copy(message)),
    }
}

async fn import<T, N, C, R>(
    controller: &ConfigController<T, N, C, R>,
    draft: &str,
) -> Result<(), RunError>
where
    T: ConfigTransport,
    N: Notifier,
    C: Clipboard,
    R: ActionReporter,
{
    match controller.import(draft).await {
        ImportOutcome::Imported => {
            if controller.store().await.has_implicit_defaults() {
                tracing::info!("Server filled in defaults; see 'show --full'");
            }
            Ok(())
        }
        ImportOutcome::Failed(message) => Err(RunError::Import(message)),
        ImportOutcome::Busy => Err(RunError::Import("another import is in progress".to_string())),
    }
}

/// Reads the document to import from `path`, or stdin for `-`.
///
/// Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`RunError::ReadDraft`] if reading fails.
fn read_draft(path: &Path) -> Result<String, RunError> {
    let result = if path == Path::new(STDIN_PATH) {
        read_trimmed(std::io::stdin().lock())
    } else {
        std::fs::read_to_string(path).map(|text| text.trim().to_string())
    };

    result.map_err(|source| RunError::ReadDraft {
        path: path.to_path_buf(),
        source,
    })
}

fn read_trimmed(mut reader: impl Read) -> std::io::Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text.trim().to_string())
}

/// Validates `value` and describes what it parses to.
///
/// # Errors
///
/// Returns the validator's [`FormatError`] if `value` is malformed.
pub fn describe_value(kind: ValidatorKind, value: &str) -> Result<String, FormatError> {
    let description = match kind {
        ValidatorKind::Count => parse_count(value)?.map(|n| n.to_string()),
        ValidatorKind::ByteSize => parse_byte_size(value)?.map(|n| format!("{n} bytes")),
        ValidatorKind::Duration => parse_duration(value)?.map(|d| format!("{}s", d.as_secs())),
    };

    Ok(description.unwrap_or_else(|| "empty (uses the default)".to_string()))
}
