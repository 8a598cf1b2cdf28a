//! HTTP Client
//!
//! Live [`Transport`] built on reqwest's blocking client. Each request runs
//! on smol's blocking thread pool, so awaiting it never stalls the thread
//! driving the list source.

use std::future::Future;
use std::time::Duration;

use crate::{NetError, Response, Transport};
use url::Url;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout; a hung endpoint ends in [`NetError::Timeout`]
    pub request_timeout: Duration,
    /// Default headers
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("Vitrine/", env!("CARGO_PKG_VERSION")).into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            default_headers: vec![("Accept".into(), "application/json".into())],
        }
    }
}

/// HTTP transport builder
pub struct HttpTransportBuilder {
    config: ClientConfig,
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.config.user_agent = ua.to_string();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        self.config.default_headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build(self) -> Result<HttpTransport, NetError> {
        HttpTransport::with_config(self.config)
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport talking to real endpoints
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport with default settings
    pub fn new() -> Result<Self, NetError> {
        Self::builder().build()
    }

    /// Create a transport builder
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Create with custom config
    pub fn with_config(config: ClientConfig) -> Result<Self, NetError> {
        let mut headers = reqwest::header::HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| NetError::Network(format!("Invalid header name {name}: {e}")))?;
            let value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|e| NetError::Network(format!("Invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    fn get_blocking(client: &reqwest::blocking::Client, url: Url) -> Result<Response, NetError> {
        let response = client.get(url).send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes()?.to_vec();

        Ok(Response { status, headers, body })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Response, NetError>> {
        let client = self.client.clone();
        let url = url.clone();
        async move {
            tracing::info!("HTTP GET {}", url);
            let result = smol::unblock(move || Self::get_blocking(&client, url)).await;
            match &result {
                Ok(response) => tracing::debug!(status = response.status, bytes = response.body.len(), "HTTP response"),
                Err(e) => tracing::warn!("HTTP request failed: {}", e),
            }
            result
        }
    }
}

impl From<reqwest::Error> for NetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NetError::Timeout
        } else if e.is_builder() {
            NetError::InvalidUrl(e.to_string())
        } else {
            NetError::Network(e.to_string())
        }
    }
}
