//! caserpc - typed JSON-RPC 2.0 clients with camelCase/snake_case translation
//!
//! This is the convenience crate re-exporting the caserpc sub-crates. Use
//! it if you want a single dependency providing the client, the
//! `#[service]` macro and the building blocks.
//!
//! # Architecture
//!
//! - **caserpc-core**: case conversion, deep key renaming, auth, JSON-RPC
//!   types and codec, errors, observability
//! - **caserpc-client**: `ProxyClient`, its factory and builder, the HTTP
//!   transport, metrics
//! - **caserpc-macros**: `#[service]`, compile-time generation of typed
//!   service clients
//!
//! # Quick Start - Untyped Calls
//!
//! ```rust,no_run
//! use caserpc::create_client;
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
//!     let ok = client
//!         .call_raw("updateProject", Some(json!({"projectId": 1, "ownerId": 5})))
//!         .await?;
//!     println!("Updated: {}", ok);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Quick Start - Service Trait
//!
//! ```rust,no_run
//! use caserpc::{create_client, service, Error};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Project {
//!     pub id: String,
//!     pub name: String,
//!     pub owner_id: String,
//! }
//!
//! #[service]
//! pub trait Kanboard {
//!     async fn get_all_projects(&self) -> Result<Vec<Project>, Error>;
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client("https://kanboard.example.com/jsonrpc.php", "api-token", None)?;
//!
//!     for project in client.get_all_projects().await? {
//!         println!("{} owned by {}", project.name, project.owner_id);
//!     }
//!     Ok(())
//! }
//! ```

pub use caserpc_client as client;
pub use caserpc_core as core;

pub use caserpc_macros::service;

pub use caserpc_client::{create_client, ClientBuilder, HttpTransport, ProxyClient, RpcTransport};
pub use caserpc_core::{init_observability, BasicAuth, Error, FaultKind, ObservabilityConfig, Result};
