//! Client factory and builder
//!
//! [`create_client`] covers the common case: an endpoint url, an API token
//! and an optional time limit. [`ClientBuilder`] exposes the same
//! construction with more knobs:
//! - user credentials instead of an API token
//! - extra HTTP headers
//! - a custom [`RpcTransport`] (tests, proxies, alternative HTTP stacks)
//! - OpenTelemetry metrics
//!
//! Building validates every input and fails with `Error::Configuration`
//! before any network activity. Nothing is sent until the first call.
//!
//! # Examples
//!
//! ```rust,no_run
//! use caserpc_client::ClientBuilder;
//! use caserpc_core::BasicAuth;
//! use std::time::Duration;
//!
//! # fn example() -> caserpc_core::Result<()> {
//! let client = ClientBuilder::new("https://kanboard.example.com/jsonrpc.php")
//!     .credentials(BasicAuth::new("admin", "password"))
//!     .time_limit(Duration::from_secs(5))
//!     .header("X-Request-Source", "nightly-sync")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::{metrics::ClientMetrics, transport::Endpoint, HttpTransport, ProxyClient, RpcTransport};
use caserpc_core::{BasicAuth, Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use std::time::Duration;

/// Create a client for `url` authenticated with an API token
///
/// # Errors
///
/// `Error::Configuration` if `url` is not an absolute http(s) url, `token`
/// is empty, or `time_limit` is zero.
///
/// ```rust
/// use caserpc_client::create_client;
/// use std::time::Duration;
///
/// let client = create_client("http://localhost/jsonrpc.php", "token", Some(Duration::from_secs(3)));
/// assert!(client.is_ok());
///
/// let bad = create_client("not a url", "token", None);
/// assert!(bad.is_err());
/// ```
pub fn create_client(url: &str, token: &str, time_limit: Option<Duration>) -> Result<ProxyClient> {
    let mut builder = ClientBuilder::new(url).token(token);
    if let Some(limit) = time_limit {
        builder = builder.time_limit(limit);
    }
    builder.build()
}

/// Builder for configuring and creating a [`ProxyClient`]
pub struct ClientBuilder {
    url: String,
    credentials: Option<BasicAuth>,
    time_limit: Option<Duration>,
    headers: Vec<(String, String)>,
    transport: Option<Arc<dyn RpcTransport>>,
    metrics: Option<ClientMetrics>,
}

impl ClientBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
            time_limit: None,
            headers: Vec::new(),
            transport: None,
            metrics: None,
        }
    }

    /// Authenticate with an API token (user `jsonrpc`)
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(BasicAuth::api_token(token));
        self
    }

    /// Authenticate with explicit credentials
    pub fn credentials(mut self, credentials: BasicAuth) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Fail any call that has not completed within `limit`
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Add a header sent with every request
    ///
    /// Cannot override `Authorization` or `Content-Type`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the default HTTP transport
    pub fn transport(mut self, transport: Arc<dyn RpcTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Record OpenTelemetry metrics for every call
    pub fn with_metrics(mut self, metrics: ClientMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validate the configuration and create the client
    pub fn build(self) -> Result<ProxyClient> {
        let url = parse_url(&self.url)?;

        let credentials = self
            .credentials
            .ok_or_else(|| Error::Configuration("missing API token".to_string()))?;
        if credentials.is_empty() {
            return Err(Error::Configuration("API token must not be empty".to_string()));
        }

        if self.time_limit == Some(Duration::ZERO) {
            return Err(Error::Configuration("time limit must be positive".to_string()));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Configuration(format!("header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Configuration(format!("header {}: {}", name, e)))?;
            headers.append(name, value);
        }

        let mut auth = HeaderValue::from_str(&credentials.header_value())
            .map_err(|e| Error::Configuration(format!("credentials: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static("application/json"));

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new()));

        tracing::debug!(url = %url, time_limit = ?self.time_limit, "Client configured");

        Ok(ProxyClient {
            endpoint: Arc::new(Endpoint::new(url, headers, self.time_limit)),
            transport,
            next_id: Arc::new(AtomicI64::new(1)),
            metrics: self.metrics.map(Arc::new),
        })
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::Configuration(format!("url {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(Error::Configuration(format!("url {:?} has no host", raw))),
        other => Err(Error::Configuration(format!(
            "url {:?}: unsupported scheme {}",
            raw, other
        ))),
    }
}
