//! Presentation layer over a [`ConfigStore`].
//!
//! [`ConfigController`] turns store operations into user feedback: every
//! outcome ends in exactly one [`Notifier`] call and no failure escapes.
//! Console implementations: [`ConsoleNotifier`], [`StdoutClipboard`] and
//! [`FileClipboard`].

mod console;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::classify::{ActionReporter, CaughtError, ErrorFormatter, Location};
use crate::store::{ConfigStore, ConfigView, StoreState};
use crate::transport::ConfigTransport;

pub use console::{ConsoleNotifier, FileClipboard, StdoutClipboard};

/// Notification titles.
pub mod title {
    /// Loading the configuration failed.
    pub const FETCH_FAILED: &str = "Fetch failed";
    /// The original text was copied.
    pub const COPY_SUCCESS: &str = "Copy TOML success";
    /// Copying the original text failed.
    pub const COPY_FAILED: &str = "Copy TOML failed";
    /// The draft was imported.
    pub const IMPORT_SUCCESS: &str = "Import success";
    /// Importing the draft failed.
    pub const IMPORT_FAILED: &str = "Import failed";
}

/// Route and path reported with client exceptions raised by this view.
pub const VIEW_ROUTE: &str = "config";
/// See [`VIEW_ROUTE`].
pub const VIEW_PATH: &str = "/config";

/// Shows short titled messages to the user.
pub trait Notifier: Send + Sync {
    /// Shows `title` with an optional longer description.
    fn notify(&self, title: &str, description: Option<&str>);
}

/// Destination for copied configuration text.
pub trait Clipboard: Send + Sync {
    /// Writes `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the text could not be written.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Errors from a [`Clipboard`].
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Writing to the target failed.
    #[error("Failed to write to {target}: {source}")]
    Write {
        /// Where the text was going.
        target: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result of [`ConfigController::mount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// The configuration was loaded.
    Loaded,
    /// Loading failed; the message was shown to the user.
    Failed(String),
    /// The controller was mounted before; nothing was fetched.
    AlreadyMounted,
}

/// Result of [`ConfigController::copy_original`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text was written to the clipboard.
    Copied,
    /// The clipboard rejected the text; the message was shown.
    Failed(String),
}

/// Result of [`ConfigController::import`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The server accepted the draft.
    Imported,
    /// The import was rejected; the message was shown.
    Failed(String),
    /// Another import is in flight; nothing was sent.
    Busy,
}

impl MountOutcome {
    /// Returns true if the configuration was loaded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

impl CopyOutcome {
    /// Returns true if the text was copied.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

impl ImportOutcome {
    /// Returns true if the draft was accepted.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Imported)
    }
}

/// Clears the in-flight import flag when dropped.
struct ImportGuard<'a>(&'a AtomicBool);

impl Drop for ImportGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// What a renderer needs to draw the configuration view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// The stored document.
    pub original: String,
    /// The document with defaults.
    pub full: String,
    /// Views to offer, in display order.
    pub views: Vec<ConfigView>,
    /// Store lifecycle state.
    pub state: StoreState,
    /// Whether an import is in flight.
    pub importing: bool,
}

/// Read-only access to the controller's store.
#[derive(Debug)]
pub struct StoreRef<'a, T>(MutexGuard<'a, ConfigStore<T>>);

impl<T> Deref for StoreRef<'_, T> {
    type Target = ConfigStore<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Drives a [`ConfigStore`] and reports outcomes.
///
/// All methods take `&self`; a second [`import`](Self::import) started
/// while one is pending returns [`ImportOutcome::Busy`] instead of
/// queueing.
///
/// # Type Parameters
///
/// - `T`: Transport used by the store
/// - `N`: Where notifications go
/// - `C`: Clipboard for copied text
/// - `R`: Reporter for client exceptions
pub struct ConfigController<T, N, C, R> {
    store: Mutex<ConfigStore<T>>,
    notifier: N,
    clipboard: C,
    formatter: ErrorFormatter<R>,
    mounted: AtomicBool,
    importing: AtomicBool,
}

impl<T, N, C, R> ConfigController<T, N, C, R>
where
    T: ConfigTransport,
    N: Notifier,
    C: Clipboard,
    R: ActionReporter,
{
    /// Creates a controller reporting at [`VIEW_ROUTE`] / [`VIEW_PATH`].
    pub fn new(store: ConfigStore<T>, notifier: N, clipboard: C, reporter: R) -> Self {
        Self {
            store: Mutex::new(store),
            notifier,
            clipboard,
            formatter: ErrorFormatter::new(reporter, Location::new(VIEW_ROUTE, VIEW_PATH)),
            mounted: AtomicBool::new(false),
            importing: AtomicBool::new(false),
        }
    }

    /// Reports client exceptions at `location` instead.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.formatter = self.formatter.with_location(location);
        self
    }

    /// Loads the configuration the first time it is called.
    ///
    /// Later calls return [`MountOutcome::AlreadyMounted`] without
    /// contacting the server, even if the first load failed.
    pub async fn mount(&self) -> MountOutcome {
        if self.mounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("Configuration view already mounted");
            return MountOutcome::AlreadyMounted;
        }

        let result = self.store.lock().await.fetch().await;
        match result {
            Ok(()) => MountOutcome::Loaded,
            Err(e) => {
                let message = self.formatter.format(&CaughtError::from(e));
                self.notifier.notify(title::FETCH_FAILED, Some(&message));
                MountOutcome::Failed(message)
            }
        }
    }

    /// Copies the original text to the clipboard.
    pub async fn copy_original(&self) -> CopyOutcome {
        let result = {
            let store = self.store.lock().await;
            self.clipboard.write_text(store.original_text())
        };

        match result {
            Ok(()) => {
                self.notifier.notify(title::COPY_SUCCESS, None);
                CopyOutcome::Copied
            }
            Err(e) => {
                let message = self.formatter.format(&CaughtError::generic(e));
                self.notifier.notify(title::COPY_FAILED, Some(&message));
                CopyOutcome::Failed(message)
            }
        }
    }

    /// Submits `draft` as the new configuration.
    pub async fn import(&self, draft: &str) -> ImportOutcome {
        if self.importing.swap(true, Ordering::SeqCst) {
            tracing::debug!("Import already in progress, ignoring request");
            return ImportOutcome::Busy;
        }

        let result = {
            let _guard = ImportGuard(&self.importing);
            self.store.lock().await.import(draft).await
        };

        match result {
            Ok(()) => {
                self.notifier.notify(title::IMPORT_SUCCESS, None);
                ImportOutcome::Imported
            }
            Err(e) => {
                let message = self.formatter.format(&CaughtError::from(e));
                self.notifier.notify(title::IMPORT_FAILED, Some(&message));
                ImportOutcome::Failed(message)
            }
        }
    }

    /// Returns whether an import is in flight.
    #[must_use]
    pub fn is_importing(&self) -> bool {
        self.importing.load(Ordering::SeqCst)
    }

    /// Returns what the view should currently show.
    pub async fn views(&self) -> ViewState {
        let store = self.store.lock().await;
        ViewState {
            original: store.original_text().to_string(),
            full: store.full_text().to_string(),
            views: store.visible_views(),
            state: store.state(),
            importing: self.is_importing(),
        }
    }

    /// Borrows the store for reading.
    pub async fn store(&self) -> StoreRef<'_, T> {
        StoreRef(self.store.lock().await)
    }

    /// Returns the notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns the clipboard.
    #[must_use]
    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Returns the reporter.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        self.formatter.reporter()
    }
}
