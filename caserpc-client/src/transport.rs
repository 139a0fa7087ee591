//! Transport seam between the client and the network
//!
//! A [`ProxyClient`](crate::ProxyClient) knows nothing about HTTP. Each call
//! hands an [`Endpoint`] and a ready-made [`JsonRpcRequest`] to an
//! [`RpcTransport`] and expects back either the raw `result` value or a
//! classified fault.
//!
//! # Transport Contract
//!
//! Implementations must:
//! - send the request as the JSON body, with every header from the endpoint
//! - fail with `Error::Timeout` when the endpoint's timeout elapses
//! - return JSON-RPC error objects as `Error::Remote`, unmodified
//! - return connection-level failures as `Error::Transport`
//! - return undecodable or invalid envelopes as `Error::MalformedResponse`
//!
//! Key renaming is not the transport's business: params arrive already in
//! snake_case and the result is returned exactly as received.

use async_trait::async_trait;
use caserpc_core::{codec, Error, Id, JsonRpcRequest, Result};
use reqwest::header::HeaderMap;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

/// Immutable per-client destination of every call
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Endpoint {
    pub fn new(url: Url, headers: HeaderMap, timeout: Option<Duration>) -> Self {
        Self {
            url,
            headers,
            timeout,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers sent with every request, `Authorization` included
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// One JSON-RPC round trip
///
/// Object-safe so clients can hold an `Arc<dyn RpcTransport>` and tests can
/// substitute in-memory transports.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Send `request` to `endpoint` and return the response's `result` member
    async fn send(&self, endpoint: &Endpoint, request: JsonRpcRequest) -> Result<Value>;
}

/// HTTP POST transport built on reqwest
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured reqwest client (proxies, TLS roots, pool sizes)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, endpoint: &Endpoint, request: JsonRpcRequest) -> Result<Value> {
        let body = codec::encode_request(&request)?;

        let mut builder = self
            .client
            .post(endpoint.url().clone())
            .headers(endpoint.headers().clone())
            .body(body);
        if let Some(limit) = endpoint.timeout() {
            builder = builder.timeout(limit);
        }

        tracing::debug!(url = %endpoint.url(), id = %request.id, "Posting request");

        let response = builder
            .send()
            .await
            .map_err(|e| classify(e, endpoint.timeout()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify(e, endpoint.timeout()))?;

        if !status.is_success() {
            // Some servers pair a JSON-RPC error object with a 4xx/5xx status
            return match codec::decode_response(&text) {
                Ok(envelope) if envelope.is_error() => envelope.into_result(),
                _ => Err(Error::Transport(format!("HTTP status {}", status))),
            };
        }

        let envelope = codec::decode_response(&text)?;

        // A null id is allowed on errors the server could not attribute
        let unattributed_error = envelope.is_error() && envelope.id == Id::Null;
        if envelope.id != request.id && !unattributed_error {
            return Err(Error::MalformedResponse(format!(
                "response id {} does not match request id {}",
                envelope.id, request.id
            )));
        }

        envelope.into_result()
    }
}

/// Map a reqwest failure onto the fault taxonomy
fn classify(error: reqwest::Error, limit: Option<Duration>) -> Error {
    if error.is_timeout() {
        Error::Timeout(limit.unwrap_or_default())
    } else if error.is_decode() {
        Error::MalformedResponse(error.to_string())
    } else {
        Error::Transport(error.to_string())
    }
}
