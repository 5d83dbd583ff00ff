//! Admin API implementation of [`ConfigTransport`].

use http::Method;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::classify::ClassifiedError;
use crate::time::{Sleeper, TokioSleeper};

use super::{
    ConfigSnapshot, ConfigTransport, HttpClient, HttpError, HttpRequest, HttpResponse,
    IsRetryable, RetryPolicy, TransportError,
};

/// Path of the configuration resource, relative to the API base URL.
pub const CONFIG_ENDPOINT: &str = "toml";

/// Content type of submitted configuration documents.
pub const TOML_CONTENT_TYPE: &str = "application/toml";

/// Snapshot as sent by the server. `full` may be omitted when it equals
/// `original`.
#[derive(Debug, Deserialize)]
struct SnapshotBody {
    original: String,
    #[serde(default)]
    full: Option<String>,
}

impl From<SnapshotBody> for ConfigSnapshot {
    fn from(body: SnapshotBody) -> Self {
        let full = body.full.unwrap_or_else(|| body.original.clone());
        Self {
            original: body.original,
            full,
        }
    }
}

/// [`ConfigTransport`] speaking to the admin server's HTTP API.
///
/// - `GET {base}/toml` returns `{"original": "...", "full": "..."}`
/// - `POST {base}/toml` with a TOML body replaces the configuration and
///   returns the same shape, or an empty body
///
/// Reads are retried according to the [`RetryPolicy`]; writes are sent once.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use confsync::transport::{HttpTransport, ReqwestClient};
/// use url::Url;
///
/// let transport = HttpTransport::new(
///     ReqwestClient::new(),
///     Url::parse("http://127.0.0.1:3018/api").unwrap(),
/// );
/// assert_eq!(transport.base_url().as_str(), "http://127.0.0.1:3018/api/");
/// ```
#[derive(Debug)]
pub struct HttpTransport<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    base_url: Url,
    headers: http::HeaderMap,
    retry_policy: RetryPolicy,
}

impl<H> HttpTransport<H, TokioSleeper> {
    /// Creates a transport rooted at `base_url`.
    ///
    /// A trailing slash is added to the base path so the endpoint is
    /// resolved beneath it.
    #[must_use]
    pub fn new(client: H, base_url: Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            base_url: with_trailing_slash(base_url),
            headers: http::HeaderMap::new(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> HttpTransport<H, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpTransport<H, S2> {
        HttpTransport {
            client: self.client,
            sleeper,
            base_url: self.base_url,
            headers: self.headers,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets headers sent with every request (authorization, custom headers).
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the retry policy for reads.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the retry policy for reads.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the full URL of the configuration resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the base URL cannot be joined.
    pub fn endpoint(&self) -> Result<Url, HttpError> {
        self.base_url
            .join(CONFIG_ENDPOINT)
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))
    }
}

impl<H: HttpClient, S: Sleeper> HttpTransport<H, S> {
    fn build_request(&self, method: Method, body: Option<&str>) -> Result<HttpRequest, HttpError> {
        let mut request = HttpRequest::new(method, self.endpoint()?)
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(text) = body {
            request = request
                .with_header(CONTENT_TYPE, HeaderValue::from_static(TOML_CONTENT_TYPE))
                .with_body(text);
        }

        Ok(request.with_headers(&self.headers))
    }

    /// Sends one request, turning non-2xx statuses into errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending admin request");

        let response = self.client.request(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        Err(TransportError::Status {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    async fn fetch_once(&self) -> Result<ConfigSnapshot, TransportError> {
        let request = self.build_request(Method::GET, None)?;
        let response = self.execute(request).await?;
        decode_snapshot(&response)
    }

    async fn fetch_with_retry(&self) -> Result<ConfigSnapshot, TransportError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) if e.is_retryable() && self.retry_policy.should_retry(attempt) => {
                    let delay = self.retry_policy.delay_for_retry(attempt - 1);
                    tracing::warn!(
                        "Fetching configuration failed (attempt {attempt}/{}): {e}, retrying in {delay:?}",
                        self.retry_policy.max_attempts
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn submit(&self, text: &str) -> Result<ConfigSnapshot, TransportError> {
        let request = self.build_request(Method::POST, Some(text))?;
        let response = self.execute(request).await?;

        if !response.is_blank() {
            return decode_snapshot(&response);
        }

        tracing::debug!("Configuration accepted without a snapshot, fetching it");
        match self.fetch_with_retry().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                // The write already succeeded; keep what was sent.
                tracing::warn!("Configuration accepted but refreshing it failed: {e}");
                Ok(ConfigSnapshot::new(text, text))
            }
        }
    }
}

impl<H: HttpClient, S: Sleeper> ConfigTransport for HttpTransport<H, S> {
    async fn get_config(&self) -> Result<ConfigSnapshot, ClassifiedError> {
        self.fetch_with_retry().await.map_err(ClassifiedError::from)
    }

    async fn put_config(&self, text: &str) -> Result<ConfigSnapshot, ClassifiedError> {
        self.submit(text).await.map_err(ClassifiedError::from)
    }
}

fn decode_snapshot(response: &HttpResponse) -> Result<ConfigSnapshot, TransportError> {
    serde_json::from_slice::<SnapshotBody>(&response.body)
        .map(ConfigSnapshot::from)
        .map_err(|e| TransportError::Decode(e.to_string()))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
