//! Request and response values exchanged with an [`HttpClient`].

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

use super::HttpError;

/// One call to the admin API.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// TOML document for imports; reads carry none.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Appends `value` under `name`; earlier values for the name stay.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Merges user-supplied headers. A name present in `headers` drops
    /// whatever the request already had for it, so configured headers win
    /// over built-in ones such as `Accept`.
    #[must_use]
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        for name in headers.keys() {
            self.headers.remove(name);
        }
        for (name, value) in headers {
            self.headers.append(name, value.clone());
        }
        self
    }
}

/// Status, headers and the whole body of a reply.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as UTF-8, or `None` when it is not valid text.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// True when the server sent nothing but whitespace, as some admin
    /// servers do after accepting an import.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Sends [`HttpRequest`]s. `reqwest` backs it in production
/// ([`super::ReqwestClient`]); tests script replies.
pub trait HttpClient: Send + Sync {
    /// Performs `req`. Any status, 4xx and 5xx included, comes back as
    /// `Ok`; classifying it is the caller's job.
    ///
    /// # Errors
    ///
    /// [`HttpError::Connection`] or [`HttpError::Timeout`] when no reply
    /// arrives, [`HttpError::InvalidUrl`] when the request cannot be built.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
