//! Transport error types and their classification.

use serde::Deserialize;
use thiserror::Error;

use crate::classify::{ClassifiedError, category};

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused, reset, aborted body).
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built, typically a malformed URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Any failure of a single admin API exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("Server returned {status}")]
    Status {
        /// The status code returned
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// A success response did not contain a configuration snapshot.
    #[error("Failed to decode server response: {0}")]
    Decode(String),
}

/// Error payload returned by the admin server.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    category: Option<String>,
}

impl From<HttpError> for ClassifiedError {
    fn from(err: HttpError) -> Self {
        let category = match &err {
            HttpError::Timeout => category::TIMEOUT,
            HttpError::Connection(_) => category::CONNECTION,
            HttpError::InvalidUrl(_) => category::REQUEST,
        };
        Self::new(err.to_string())
            .with_category(category)
            .into_exception()
    }
}

impl From<TransportError> for ClassifiedError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Http(e) => e.into(),
            TransportError::Status { status, body } => classify_status(status, body.as_deref()),
            TransportError::Decode(reason) => {
                Self::new(format!("Failed to decode server response: {reason}"))
                    .with_category(category::DECODE)
            }
        }
    }
}

/// Builds a classified error from a server error response.
///
/// The JSON `message` and `category` fields are used when present; the
/// message falls back to the raw body, then to the status reason.
fn classify_status(status: http::StatusCode, body: Option<&str>) -> ClassifiedError {
    let body = body.map(str::trim).filter(|b| !b.is_empty());
    let parsed = body
        .and_then(|b| serde_json::from_str::<ErrorBody>(b).ok())
        .unwrap_or_default();

    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .or_else(|| {
            // A JSON body without a message is not useful as display text
            body.filter(|b| !b.starts_with('{')).map(ToString::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), ToString::to_string)
        });

    let category = parsed
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| category::HTTP.to_string());

    ClassifiedError::new(message).with_category(category)
}
