//! The proxy client dispatching typed calls over JSON-RPC
//!
//! Every call, whatever the method, runs the same pipeline:
//!
//! 1. **Serialize**: params to a JSON value
//! 2. **Rename out**: object keys camelCase → snake_case, at every depth
//! 3. **Send**: one JSON-RPC request through the transport, raced against
//!    the time limit
//! 4. **Rename in**: result keys snake_case → camelCase
//! 5. **Deserialize**: into the caller's declared result type
//!
//! Faults skip steps 4 and 5 and reach the caller as they left the
//! transport; a remote error object keeps its original key casing.
//!
//! # Cloning
//!
//! `ProxyClient` is cheaply cloneable; clones share the bound endpoint and
//! transport. Nothing is mutated after construction, so clones can be used
//! from many tasks at once and concurrent calls never interfere.

use crate::{metrics::ClientMetrics, transport::Endpoint, RpcTransport};
use caserpc_core::{
    case::{camel_to_snake, snake_to_camel},
    rename::into_renamed,
    Error, Id, JsonRpcRequest, Result,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC client bound to one endpoint
///
/// Built with [`create_client`](crate::create_client) or
/// [`ClientBuilder`](crate::ClientBuilder). Service traits declared with
/// `#[service]` are implemented for this type.
#[derive(Clone)]
pub struct ProxyClient {
    pub(crate) endpoint: Arc<Endpoint>,
    pub(crate) transport: Arc<dyn RpcTransport>,
    /// Request id source, only used to correlate responses and log lines
    pub(crate) next_id: Arc<AtomicI64>,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl ProxyClient {
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Call `method` with typed params and a typed result
    ///
    /// `params: None` sends the request without a `params` member.
    pub async fn call<P, R>(&self, method: &str, params: Option<P>) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = params
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| Error::Serialization(format!("params for {}: {}", method, e)))?;

        let result = self.call_raw(method, params).await?;

        serde_json::from_value(result)
            .map_err(|e| Error::Serialization(format!("result of {}: {}", method, e)))
    }

    /// Call `method` with raw JSON params and return the raw (renamed) result
    #[tracing::instrument(name = "rpc_call", skip(self, params), fields(method = %method, id = tracing::field::Empty))]
    pub async fn call_raw(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let start = Instant::now();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::Span::current().record("id", id);

        let params = params.map(|p| into_renamed(p, camel_to_snake));
        let request = JsonRpcRequest::new(method, params, Id::Number(id));

        let outcome = self.dispatch(request).await;
        let duration = start.elapsed().as_secs_f64();

        match outcome {
            Ok(result) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "success", duration);
                }
                tracing::debug!(duration_secs = duration, "Call completed successfully");
                Ok(into_renamed(result, snake_to_camel))
            }
            Err(error) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "error", duration);
                    m.record_error(method, error.kind());
                }
                tracing::error!(fault = %error.kind(), error = %error, "Call failed");
                Err(error)
            }
        }
    }

    /// Hand the request to the transport, enforcing the time limit here too
    /// so a transport that ignores it cannot hang the caller
    async fn dispatch(&self, request: JsonRpcRequest) -> Result<Value> {
        let send = self.transport.send(&self.endpoint, request);

        match self.endpoint.timeout() {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .unwrap_or_else(|_| Err(Error::Timeout(limit))),
            None => send.await,
        }
    }
}

impl fmt::Debug for ProxyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyClient")
            .field("url", &self.endpoint.url().as_str())
            .field("timeout", &self.endpoint.timeout())
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
