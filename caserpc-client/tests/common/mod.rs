//! Common test utilities for caserpc-client integration tests
//!
//! A small HTTP server standing in for a JSON-RPC endpoint. Every request is
//! recorded with its `Authorization` header and answered by a handler
//! closure, optionally after a delay or with a non-2xx status.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use warp::http::StatusCode;
use warp::Filter;

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// How the mock server answers one request
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self::raw(body.to_string())
    }

    pub fn raw(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Mock JSON-RPC HTTP server
pub struct MockHttpServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockHttpServer {
    /// Start a server on an ephemeral port answering with `handler`
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Value) -> MockReply + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler = Arc::new(handler);

        let recorded = requests.clone();
        let route = warp::post()
            .and(warp::header::optional::<String>("authorization"))
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::json::<Value>())
            .and_then(move |authorization, content_type, body: Value| {
                let recorded = recorded.clone();
                let handler = handler.clone();
                async move {
                    let reply = handler(&body);
                    recorded.lock().unwrap().push(RecordedRequest {
                        authorization,
                        content_type,
                        body,
                    });

                    if let Some(delay) = reply.delay {
                        tokio::time::sleep(delay).await;
                    }

                    let status = StatusCode::from_u16(reply.status).unwrap();
                    let response = warp::reply::with_header(
                        reply.body,
                        "content-type",
                        "application/json",
                    );
                    Ok::<_, std::convert::Infallible>(warp::reply::with_status(response, status))
                }
            });

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (addr, server) = warp::serve(route)
            .bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async move {
                shutdown_rx.await.ok();
            });
        tokio::spawn(server);

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Server answering every call with `result` under the request's id
    pub async fn returning(result: Value) -> Self {
        Self::start(move |req| MockReply::json(mock_result(req["id"].clone(), result.clone()))).await
    }

    pub fn url(&self) -> String {
        format!("http://{}/jsonrpc.php", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Success envelope
pub fn mock_result(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}

/// Error envelope
pub fn mock_error(id: Value, code: i32, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message},
        "id": id,
    })
}
