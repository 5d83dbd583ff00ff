//! Transport layer between the configuration store and the admin server.
//!
//! This module provides types and traits for:
//! - The store's network collaborator ([`ConfigTransport`], [`ConfigSnapshot`])
//! - The admin API implementation ([`HttpTransport`])
//! - Building HTTP requests and handling responses ([`HttpRequest`], [`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`], [`ReqwestClient`])
//! - Retrying idempotent reads ([`RetryPolicy`])
//!
//! Every failure leaving this module is a
//! [`ClassifiedError`](crate::classify::ClassifiedError).

mod api;
mod client;
mod error;
mod http;
mod retry;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedError;

pub use api::{CONFIG_ENDPOINT, HttpTransport, TOML_CONTENT_TYPE};
pub use client::ReqwestClient;
pub use error::{HttpError, TransportError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use retry::{IsRetryable, RetryPolicy};

/// The original and materialized configuration texts, as held by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// The document as last stored, before defaults.
    pub original: String,
    /// The effective document after the server filled in defaults.
    pub full: String,
}

impl ConfigSnapshot {
    /// Creates a snapshot from both texts.
    #[must_use]
    pub fn new(original: impl Into<String>, full: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            full: full.into(),
        }
    }

    /// Returns true if the server filled in values the original does not set.
    #[must_use]
    pub fn has_implicit_defaults(&self) -> bool {
        self.full != self.original
    }
}

/// Network collaborator of the configuration store.
///
/// # Testing
///
/// Tests drive the store with an in-memory implementation; production
/// uses [`HttpTransport`].
pub trait ConfigTransport: Send + Sync {
    /// Retrieves the current configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifiedError`] if the server cannot be reached or
    /// rejects the request.
    fn get_config(&self) -> impl Future<Output = Result<ConfigSnapshot, ClassifiedError>> + Send;

    /// Replaces the configuration with `text` and returns what the server
    /// now holds.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifiedError`] if the server cannot be reached or
    /// rejects the document.
    fn put_config(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ConfigSnapshot, ClassifiedError>> + Send;
}
