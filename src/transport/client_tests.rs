//! Tests for `ReqwestClient`.
//!
//! Construction only; exchanges with a live server are covered by the
//! transport tests through a mock client.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, ReqwestClient};

#[test]
fn new_and_default_construct() {
    let _ = format!("{:?}", ReqwestClient::new());
    let _ = format!("{:?}", ReqwestClient::default());
}

#[test]
fn with_timeout_builds_client() {
    let client = ReqwestClient::with_timeout(Duration::from_secs(5)).unwrap();

    assert!(format!("{client:?}").contains("ReqwestClient"));
}

#[test]
fn from_client_accepts_custom_client() {
    let custom = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap();
    let _ = ReqwestClient::from_client(custom);
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestClient>();
}

#[tokio::test]
async fn request_to_invalid_host_returns_error_or_proxy_response() {
    let client = ReqwestClient::new();
    let url = url::Url::parse("http://invalid.invalid.invalid/api/toml").unwrap();

    let result = client.request(HttpRequest::new(http::Method::GET, url)).await;

    // A proxy in the environment may answer with an error status instead.
    match result {
        Err(HttpError::Connection(_) | HttpError::Timeout) => {}
        Ok(resp) if !resp.is_success() => {}
        other => panic!("Expected connection error or proxy error response, got {other:?}"),
    }
}
