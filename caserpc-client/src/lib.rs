//! JSON-RPC 2.0 client with transparent key-case translation
//!
//! The remote service speaks snake_case, the calling code speaks camelCase.
//! A [`ProxyClient`] sits in between: every outgoing parameter object has
//! its keys renamed camelCase → snake_case, every successful result has its
//! keys renamed back, and error objects are passed through untouched.
//!
//! # Core Features
//!
//! - **Factory**: [`create_client`] binds url, API token and time limit
//! - **Builder**: [`ClientBuilder`] for extra headers, custom transports, metrics
//! - **Pluggable transport**: [`RpcTransport`] trait, [`HttpTransport`] default
//! - **Timeouts**: per-call time limit enforced by the client itself
//! - **Observability**: `tracing` spans per call, OpenTelemetry metrics
//!
//! Typed service interfaces are declared with the `#[service]` macro from
//! `caserpc-macros`, which implements the trait for [`ProxyClient`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use caserpc_client::create_client;
//! use serde_json::json;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client(
//!         "https://kanboard.example.com/jsonrpc.php",
//!         "api-token",
//!         Some(Duration::from_secs(10)),
//!     )?;
//!
//!     // Sent as {"project_id": 1}, answered keys come back camelCase
//!     let project = client.call_raw("getProjectById", Some(json!({"projectId": 1}))).await?;
//!     println!("Owner: {}", project["ownerId"]);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod metrics;
mod transport;

pub use client::ProxyClient;
pub use client_builder::{create_client, ClientBuilder};
pub use metrics::ClientMetrics;
pub use transport::{Endpoint, HttpTransport, RpcTransport};

pub use async_trait::async_trait;
pub use caserpc_core::{Error, FaultKind, Result};
