//! Session state for the remote configuration.
//!
//! [`ConfigStore`] owns the original and full configuration texts and is
//! the only place they change. It moves through [`StoreState`] as
//! follows:
//!
//! ```text
//! Idle ──fetch──▶ Fetching ──ok──▶ Ready ◀──────────────┐
//!                    │                │                  │
//!                    └──err──▶ Failed │ import           │ ok / err
//!                                     ▼                  │
//!                                 Importing ─────────────┘
//! ```
//!
//! A failed fetch after data was loaded returns to `Ready`; a failed
//! import never changes the texts.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::fmt;

use crate::classify::ClassifiedError;
use crate::transport::{ConfigSnapshot, ConfigTransport};

/// Lifecycle of a [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Nothing loaded yet.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// Texts reflect the server.
    Ready,
    /// The first fetch failed; fetching again is allowed.
    Failed,
    /// An import is in flight.
    Importing,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Importing => "importing",
        };
        f.write_str(name)
    }
}

/// Views a renderer should offer for the current texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigView {
    /// The stored document.
    Original,
    /// The document with server defaults filled in.
    Full,
    /// The editor for a replacement document.
    Import,
}

/// Owned state of the remote configuration.
///
/// Both mutating operations take `&mut self`, so a store cannot run a
/// fetch and an import at the same time.
///
/// # Example
///
/// ```no_run
/// use confsync::store::ConfigStore;
/// use confsync::transport::{HttpTransport, ReqwestClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new(ReqwestClient::new(), "http://127.0.0.1:3018/api".parse()?);
/// let mut store = ConfigStore::new(transport);
///
/// store.fetch().await?;
/// println!("{}", store.original_text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigStore<T> {
    transport: T,
    original_text: String,
    full_text: String,
    last_good: Option<ConfigSnapshot>,
    state: StoreState,
    max_import_size: Option<u64>,
}

impl<T> ConfigStore<T> {
    /// Creates an idle store with empty texts.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            original_text: String::new(),
            full_text: String::new(),
            last_good: None,
            state: StoreState::Idle,
            max_import_size: None,
        }
    }

    /// Rejects imports larger than `bytes` before they are sent.
    #[must_use]
    pub const fn with_max_import_size(mut self, bytes: u64) -> Self {
        self.max_import_size = Some(bytes);
        self
    }

    /// The document as last stored, before defaults.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The effective document after defaults.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The most recent snapshot accepted into the store.
    #[must_use]
    pub const fn last_good(&self) -> Option<&ConfigSnapshot> {
        self.last_good.as_ref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> StoreState {
        self.state
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns true if the server filled in values the original does not set.
    #[must_use]
    pub fn has_implicit_defaults(&self) -> bool {
        self.full_text != self.original_text
    }

    /// Views to present: the full view only when it differs from the original.
    #[must_use]
    pub fn visible_views(&self) -> Vec<ConfigView> {
        if self.has_implicit_defaults() {
            vec![ConfigView::Original, ConfigView::Full, ConfigView::Import]
        } else {
            vec![ConfigView::Original, ConfigView::Import]
        }
    }

    fn accept(&mut self, snapshot: ConfigSnapshot) {
        self.original_text.clone_from(&snapshot.original);
        self.full_text.clone_from(&snapshot.full);
        self.last_good = Some(snapshot);
        self.state = StoreState::Ready;
    }

    fn check_import(&self, text: &str) -> Result<(), ClassifiedError> {
        if text.trim().is_empty() {
            return Err(ClassifiedError::validation(
                "Configuration to import is empty",
            ));
        }

        if let Some(limit) = self.max_import_size {
            let size = u64::try_from(text.len()).unwrap_or(u64::MAX);
            if size > limit {
                return Err(ClassifiedError::validation(format!(
                    "Configuration is {size} bytes, more than the {limit} byte limit"
                )));
            }
        }

        Ok(())
    }
}

impl<T: ConfigTransport> ConfigStore<T> {
    /// Loads the current configuration from the server.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`ClassifiedError`]. Texts loaded by an
    /// earlier fetch are kept.
    pub async fn fetch(&mut self) -> Result<(), ClassifiedError> {
        tracing::debug!("Fetching configuration");

        let result = {
            let _transition = Transition::begin(&mut self.state, StoreState::Fetching);
            self.transport.get_config().await
        };

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    implicit_defaults = snapshot.has_implicit_defaults(),
                    "Configuration loaded ({} bytes)",
                    snapshot.original.len()
                );
                self.accept(snapshot);
                Ok(())
            }
            Err(e) => {
                self.state = if self.last_good.is_some() {
                    StoreState::Ready
                } else {
                    StoreState::Failed
                };
                tracing::debug!(state = %self.state, "Fetching configuration failed: {e}");
                Err(e)
            }
        }
    }

    /// Replaces the server configuration with `text`.
    ///
    /// On success both texts become what the server now holds. On failure
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// Returns a `validation` [`ClassifiedError`] without contacting the
    /// server if `text` is blank or over the size limit; otherwise
    /// propagates the transport's error.
    pub async fn import(&mut self, text: &str) -> Result<(), ClassifiedError> {
        self.check_import(text)?;

        tracing::debug!("Importing configuration ({} bytes)", text.len());

        let result = {
            let _transition = Transition::begin(&mut self.state, StoreState::Importing);
            self.transport.put_config(text).await
        };

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    implicit_defaults = snapshot.has_implicit_defaults(),
                    "Configuration imported"
                );
                self.accept(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Importing configuration failed: {e}");
                Err(e)
            }
        }
    }
}

/// Holds the store in an in-flight state while a transport call runs.
///
/// Dropping it restores the previous state, including when the pending
/// call is cancelled.
struct Transition<'a> {
    state: &'a mut StoreState,
    previous: StoreState,
}

impl<'a> Transition<'a> {
    fn begin(state: &'a mut StoreState, during: StoreState) -> Self {
        let previous = std::mem::replace(state, during);
        Self { state, previous }
    }
}

impl Drop for Transition<'_> {
    fn drop(&mut self) {
        *self.state = self.previous;
    }
}
