//! JSON-RPC 2.0 request and response envelopes
//!
//! Only the message shapes a client needs are modelled: a request carrying
//! a method name, optional params and an id, and the response that answers
//! it with either a `result` or an `error`.
//!
//! A `"result": null` member is a successful response whose value is null,
//! which is different from a response that has no `result` member at all.
//! `JsonRpcResponse` keeps that distinction so the codec can reject the
//! latter.

use crate::error::{Error, JsonRpcErrorData, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Protocol version string carried by every message
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// Serialized untagged, directly as the inner value.
///
/// ```rust
/// use caserpc_core::Id;
///
/// assert_eq!(Id::Number(42).to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    String(String),
    Number(i64),
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

/// JSON-RPC 2.0 request message
///
/// `params` is omitted from the JSON when `None`, which is how methods
/// without a parameter object are called.
///
/// ```rust
/// use caserpc_core::{Id, JsonRpcRequest};
/// use serde_json::json;
///
/// let req = JsonRpcRequest::new("getProjectById", Some(json!({"project_id": 1})), Id::Number(1));
/// assert_eq!(req.jsonrpc, "2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: Id,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Option<Value>, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response message
///
/// Exactly one of `result` and `error` is present in a well-formed
/// response. [`crate::codec::decode_response`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// `Some(Value::Null)` for an explicit `"result": null`
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    #[serde(default = "null_id")]
    pub id: Id,
}

impl JsonRpcResponse {
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.error.is_none()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Split the response into the call outcome
    ///
    /// The error object is returned untouched as [`Error::Remote`].
    pub fn into_result(self) -> Result<Value> {
        match (self.result, self.error) {
            (Some(value), None) => Ok(value),
            (None, Some(error)) => Err(Error::Remote(error)),
            (Some(_), Some(_)) => Err(Error::MalformedResponse(
                "response carries both result and error".to_string(),
            )),
            (None, None) => Err(Error::MalformedResponse(
                "response carries neither result nor error".to_string(),
            )),
        }
    }
}

/// Treat a present member as `Some`, even when its value is null
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn null_id() -> Id {
    Id::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_display() {
        assert_eq!(Id::String("test".to_string()).to_string(), "\"test\"");
        assert_eq!(Id::Number(42).to_string(), "42");
        assert_eq!(Id::Null.to_string(), "null");
    }

    #[test]
    fn test_request_without_params_omits_member() {
        let req = JsonRpcRequest::new("getAllProjects", None, Id::Number(1));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, json!({"jsonrpc": "2.0", "method": "getAllProjects", "id": 1}));
    }

    #[test]
    fn test_request_with_params() {
        let req = JsonRpcRequest::new("getProjectById", Some(json!({"project_id": 3})), Id::Number(7));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["params"]["project_id"], 3);
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_null_result_is_present() {
        let resp: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "result": null, "id": 1})).unwrap();
        assert_eq!(resp.result, Some(Value::Null));
        assert_eq!(resp.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_missing_result_is_absent() {
        let resp: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert_eq!(resp.result, None);
        assert!(matches!(resp.into_result(), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_error_response_into_remote() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "error": {"code": -32601, "message": "Method not found"},
            "id": 1
        }))
        .unwrap();
        assert!(resp.is_error());
        match resp.into_result() {
            Err(Error::Remote(data)) => {
                assert_eq!(data.code, -32601);
                assert_eq!(data.message, "Method not found");
            }
            other => panic!("Expected remote fault, got {:?}", other),
        }
    }

    #[test]
    fn test_both_members_rejected() {
        let resp = JsonRpcResponse {
            jsonrpc: "2.0".into(),
            result: Some(json!(1)),
            error: Some(JsonRpcErrorData::new(-32603, "x")),
            id: Id::Number(1),
        };
        assert!(!resp.is_success());
        assert!(matches!(resp.into_result(), Err(Error::MalformedResponse(_))));
    }
}
