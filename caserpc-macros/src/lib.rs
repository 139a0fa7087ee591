//! Procedural macros for caserpc
//!
//! # Available Macros
//!
//! ## `#[service]` - Typed Service Client
//!
//! Turns a trait describing a remote JSON-RPC service into a client. Each
//! method becomes one remote call:
//!
//! - the remote method name is the Rust method name in camelCase
//! - the single parameter, if any, is sent as `params`
//! - the declared `Ok` type is deserialized from the result
//!
//! Key renaming between camelCase and snake_case happens at runtime inside
//! `ProxyClient`, so parameter and result types are ordinary serde types
//! with `#[serde(rename_all = "camelCase")]`.
//!
//! The method list is fixed at compile time: calling a method the trait
//! does not declare is a type error, not a runtime fault.
//!
//! # Examples
//!
//! ```ignore
//! use caserpc::{service, Error};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct ProjectId {
//!     project_id: i64,
//! }
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Project {
//!     id: String,
//!     owner_id: String,
//! }
//!
//! #[service]
//! pub trait Kanboard {
//!     async fn get_all_projects(&self) -> Result<Vec<Project>, Error>;
//!     async fn get_project_by_id(&self, params: ProjectId) -> Result<Option<Project>, Error>;
//! }
//!
//! // client: caserpc::ProxyClient
//! let projects = client.get_all_projects().await?;
//! ```

mod service;

use proc_macro::TokenStream;

/// Attribute macro declaring a remote JSON-RPC service
///
/// Applied to a trait whose methods all look like
/// `async fn name(&self[, params: P]) -> Result<R, E>`, with `P: Serialize`,
/// `R: DeserializeOwned` and `E: From<caserpc::Error>`. Emits the trait
/// unchanged plus an implementation for `ProxyClient`.
///
/// # Generated Code
///
/// ```ignore
/// #[service]
/// pub trait Kanboard {
///     async fn get_project_by_id(&self, params: ProjectId) -> Result<Option<Project>, Error>;
/// }
/// ```
///
/// Expands to approximately:
///
/// ```ignore
/// pub trait Kanboard {
///     async fn get_project_by_id(&self, params: ProjectId) -> Result<Option<Project>, Error>;
/// }
///
/// impl Kanboard for ::caserpc::client::ProxyClient {
///     async fn get_project_by_id(&self, params: ProjectId) -> Result<Option<Project>, Error> {
///         Ok(::caserpc::client::ProxyClient::call(self, "getProjectById", Some(params)).await?)
///     }
/// }
/// ```
///
/// # Attributes
///
/// - `#[rpc(name = "...")]` on a method overrides the remote method name
/// - `#[service(crate = "...")]` sets the path of the client crate, for
///   code depending on `caserpc-client` directly instead of `caserpc`
///
/// Methods with a default body are left as they are and not forwarded.
///
/// # Limitations
///
/// - Methods must be `async` and take `&self`
/// - At most one parameter besides `&self`
/// - No generic parameters on the trait or its methods
#[proc_macro_attribute]
pub fn service(attr: TokenStream, item: TokenStream) -> TokenStream {
    service::service_impl(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
