//! Tests for HTTP request/response types.

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};

use super::{HttpRequest, HttpResponse};

fn url() -> url::Url {
    url::Url::parse("http://127.0.0.1:3018/api/toml").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_has_no_headers_or_body() {
        let req = HttpRequest::new(Method::GET, url());

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url, url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_body_accepts_text() {
        let req = HttpRequest::new(Method::POST, url()).with_body("a = 1");

        assert_eq!(req.body, Some(b"a = 1".to_vec()));
    }

    #[test]
    fn with_header_appends_values() {
        let req = HttpRequest::new(Method::GET, url())
            .with_header(ACCEPT, HeaderValue::from_static("text/plain"))
            .with_header(ACCEPT, HeaderValue::from_static("application/json"));

        assert_eq!(req.headers.get_all(ACCEPT).iter().count(), 2);
    }

    #[test]
    fn configured_headers_replace_built_in_ones() {
        let mut extra = HeaderMap::new();
        extra.insert(ACCEPT, HeaderValue::from_static("application/toml"));

        let req = HttpRequest::new(Method::POST, url())
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/toml"))
            .with_headers(&extra);

        let accept: Vec<_> = req.headers.get_all(ACCEPT).iter().collect();
        assert_eq!(accept, vec!["application/toml"]);
        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), "application/toml");
    }

    #[test]
    fn configured_headers_keep_multiple_values() {
        let mut extra = HeaderMap::new();
        extra.append("x-tag", HeaderValue::from_static("a"));
        extra.append("x-tag", HeaderValue::from_static("b"));

        let req = HttpRequest::new(Method::GET, url()).with_headers(&extra);

        assert_eq!(req.headers.get_all("x-tag").iter().count(), 2);
    }
}

mod http_response {
    use super::*;

    fn response(status: StatusCode, body: &[u8]) -> HttpResponse {
        HttpResponse::new(status, HeaderMap::new(), body.to_vec())
    }

    #[test]
    fn is_success_for_2xx_only() {
        assert!(response(StatusCode::OK, b"").is_success());
        assert!(response(StatusCode::NO_CONTENT, b"").is_success());
        assert!(!response(StatusCode::BAD_REQUEST, b"").is_success());
        assert!(!response(StatusCode::INTERNAL_SERVER_ERROR, b"").is_success());
    }

    #[test]
    fn body_text_requires_utf8() {
        assert_eq!(response(StatusCode::OK, b"a = 1").body_text(), Some("a = 1"));
        assert_eq!(response(StatusCode::OK, &[0xff, 0xfe]).body_text(), None);
    }

    #[test]
    fn is_blank_for_empty_or_whitespace() {
        assert!(response(StatusCode::OK, b"").is_blank());
        assert!(response(StatusCode::OK, b" \n\t").is_blank());
        assert!(!response(StatusCode::OK, b"{}").is_blank());
    }
}
