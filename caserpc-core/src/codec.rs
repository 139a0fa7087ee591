//! Codec for JSON-RPC message serialization and deserialization
//!
//! Encoding is plain serde. Decoding adds the envelope checks a client
//! needs before trusting a reply:
//!
//! - the body must be a JSON object (batch replies are never expected)
//! - `jsonrpc` must be exactly `"2.0"`
//! - exactly one of `result` and `error` must be present
//! - `error`, when present, must have an integer `code` and a `message`
//!
//! Every violation is reported as `Error::MalformedResponse`, so callers
//! can tell "the service said no" (`Error::Remote`) apart from "the
//! service said something uninterpretable".
//!
//! # Examples
//!
//! ```rust
//! use caserpc_core::{codec, Id, JsonRpcRequest};
//!
//! let request = JsonRpcRequest::new("getVersion", None, Id::Number(1));
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains("\"method\":\"getVersion\""));
//!
//! let response = codec::decode_response(r#"{"jsonrpc":"2.0","result":"1.2.30","id":1}"#).unwrap();
//! assert_eq!(response.into_result().unwrap(), "1.2.30");
//! ```

use crate::error::{Error, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use serde::Serialize;
use serde_json::Value;

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a JSON-RPC request to JSON
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Decode and validate a single JSON-RPC response
pub fn decode_response(data: &str) -> Result<JsonRpcResponse> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| Error::MalformedResponse(format!("invalid JSON: {}", e)))?;
    decode_response_value(value)
}

/// Validate an already-parsed JSON value as a JSON-RPC response
pub fn decode_response_value(value: Value) -> Result<JsonRpcResponse> {
    let object = match &value {
        Value::Object(object) => object,
        Value::Array(_) => {
            return Err(Error::MalformedResponse(
                "unexpected batch response".to_string(),
            ))
        }
        other => {
            return Err(Error::MalformedResponse(format!(
                "expected a response object, got {}",
                kind_of(other)
            )))
        }
    };

    match object.get("jsonrpc") {
        Some(Value::String(version)) if version == JSONRPC_VERSION => {}
        Some(other) => {
            return Err(Error::MalformedResponse(format!(
                "unsupported jsonrpc version {}",
                other
            )))
        }
        None => {
            return Err(Error::MalformedResponse(
                "missing jsonrpc member".to_string(),
            ))
        }
    }

    match (object.contains_key("result"), object.contains_key("error")) {
        (true, false) | (false, true) => {}
        (true, true) => {
            return Err(Error::MalformedResponse(
                "response carries both result and error".to_string(),
            ))
        }
        (false, false) => {
            return Err(Error::MalformedResponse(
                "response carries neither result nor error".to_string(),
            ))
        }
    }

    serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
