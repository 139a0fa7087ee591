//! Core building blocks for caserpc
//!
//! This crate holds everything the client needs that does not touch the
//! network:
//!
//! - **Case conversion**: camelCase ⇄ snake_case identifier translation
//! - **Key renaming**: recursive renaming of every object key in a JSON tree
//! - **Auth**: HTTP Basic authorization header construction
//! - **Types & codec**: JSON-RPC 2.0 request/response envelopes
//! - **Error handling**: the fault taxonomy surfaced to callers
//! - **Observability**: `tracing` subscriber initialization
//!
//! # Example
//!
//! ```rust
//! use caserpc_core::{case, rename};
//! use serde_json::json;
//!
//! let params = json!({"ownerId": 5, "startDate": "2024-01-01"});
//! let wire = rename::rename_keys(&params, case::camel_to_snake);
//! assert_eq!(wire, json!({"owner_id": 5, "start_date": "2024-01-01"}));
//!
//! let back = rename::rename_keys(&wire, case::snake_to_camel);
//! assert_eq!(back, params);
//! ```

pub mod auth;
pub mod case;
pub mod codec;
pub mod error;
pub mod observability;
pub mod rename;
pub mod types;

pub use auth::{basic_auth_header, BasicAuth};
pub use case::{camel_to_snake, snake_to_camel};
pub use error::{Error, FaultKind, JsonRpcErrorData, Result};
pub use observability::{init_observability, ObservabilityConfig};
pub use rename::{into_renamed, rename_keys};
pub use types::{Id, JsonRpcRequest, JsonRpcResponse};
