//! Vitrine Networking
//!
//! HTTP boundary for list endpoints: a [`Transport`] abstraction, the
//! blocking-client backed [`HttpTransport`], a [`ScriptedTransport`] for
//! offline fixtures, and query-string rewriting.

mod client;
mod query;
mod scripted;

pub use client::{ClientConfig, HttpTransport, HttpTransportBuilder};
pub use query::{parse_endpoint, with_query_param};
pub use scripted::ScriptedTransport;
pub use url::Url;

use std::future::Future;

/// HTTP Response
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Response with status 200 and the given body
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Response with an arbitrary status and empty body
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Check if response is OK (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, NetError> {
        serde_json::from_slice(&self.body).map_err(|e| NetError::Decode(e.to_string()))
    }

    /// Turn a non-2xx response into [`NetError::HttpError`].
    pub fn error_for_status(self) -> Result<Self, NetError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NetError::HttpError { status: self.status })
        }
    }
}

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("HTTP {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Anything able to issue a GET request.
///
/// List sources are generic over this so they can run against a live
/// endpoint or a scripted one. The returned future need not be `Send`; list
/// sources are driven from a single thread.
pub trait Transport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Response, NetError>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Response, NetError>> {
        (**self).get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status() {
        assert!(Response::ok("[]").is_success());
        assert!(!Response::with_status(404).is_success());
        assert_eq!(
            Response::with_status(500).error_for_status().unwrap_err(),
            NetError::HttpError { status: 500 }
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(NetError::HttpError { status: 503 }.to_string(), "HTTP 503");
        assert_eq!(NetError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_json_body() {
        let value = Response::ok(r#"{"data":[1]}"#).json().unwrap();
        assert_eq!(value["data"][0], 1);
        assert!(matches!(Response::ok("<html>").json(), Err(NetError::Decode(_))));
    }

    #[test]
    fn test_header_lookup() {
        let mut response = Response::ok("");
        response.headers.push(("Content-Type".into(), "application/json".into()));
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("etag"), None);
    }
}
