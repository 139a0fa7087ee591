//! Error types for caserpc
//!
//! This module defines the faults a client call can end in:
//!
//! - **Error**: the single error enum returned by every fallible operation
//! - **FaultKind**: a fieldless discriminant for matching and metrics labels
//! - **JsonRpcErrorData**: the wire-format error object from JSON-RPC 2.0
//!
//! # Fault Taxonomy
//!
//! | Variant             | Raised when                                         |
//! |---------------------|-----------------------------------------------------|
//! | `Configuration`     | the client is built from an invalid url/token/limit |
//! | `Timeout`           | the time limit elapsed without a response           |
//! | `Remote`            | the service answered with a JSON-RPC error object   |
//! | `Transport`         | the request failed below the JSON-RPC layer         |
//! | `MalformedResponse` | the reply is not a valid JSON-RPC response          |
//! | `Serialization`     | params or result do not match the declared types    |
//!
//! Remote faults are passed through exactly as received. Their payload is
//! protocol data, not domain data, so it is never key-renamed.
//!
//! Codes are whatever the server sent. Only `-32601` (method not found)
//! has a named constant, for transports that answer locally.
//!
//! # Examples
//!
//! ```rust
//! use caserpc_core::{Error, FaultKind, JsonRpcErrorData};
//!
//! let error = Error::from(JsonRpcErrorData::method_not_found("getAllProjects"));
//! assert_eq!(error.kind(), FaultKind::Remote);
//! assert_eq!(error.code(), Some(-32601));
//! assert!(!error.is_retriable());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for caserpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for caserpc operations
///
/// Cloneable so a single failure can be logged, recorded in metrics and
/// returned without re-creating it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Client construction rejected its inputs
    ///
    /// Raised before any network activity: unparsable or non-HTTP url,
    /// empty token, zero time limit, invalid extra header.
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// No response arrived within the configured time limit
    ///
    /// The request may or may not have reached the service; callers decide
    /// whether retrying is safe for the method in question.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The remote service answered with a JSON-RPC error object
    ///
    /// Code, message and data are exactly what the service sent.
    #[error("JSON-RPC error: {0}")]
    Remote(#[from] JsonRpcErrorData),

    /// The request failed below the JSON-RPC layer
    ///
    /// Connection refused, TLS failure, non-success HTTP status without a
    /// JSON-RPC body, and similar.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The reply could not be interpreted as a JSON-RPC 2.0 response
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Converting between Rust types and JSON failed
    ///
    /// Either the parameters could not be serialized, or the (renamed)
    /// result does not fit the declared result type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Fieldless discriminant of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    Configuration,
    Timeout,
    Remote,
    Transport,
    MalformedResponse,
    Serialization,
}

impl FaultKind {
    /// Stable lower-case label, used for log fields and metric attributes
    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::Configuration => "configuration",
            FaultKind::Timeout => "timeout",
            FaultKind::Remote => "remote",
            FaultKind::Transport => "transport",
            FaultKind::MalformedResponse => "malformed_response",
            FaultKind::Serialization => "serialization",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> FaultKind {
        match self {
            Error::Configuration(_) => FaultKind::Configuration,
            Error::Timeout(_) => FaultKind::Timeout,
            Error::Remote(_) => FaultKind::Remote,
            Error::Transport(_) => FaultKind::Transport,
            Error::MalformedResponse(_) => FaultKind::MalformedResponse,
            Error::Serialization(_) => FaultKind::Serialization,
        }
    }

    /// Remote JSON-RPC error code, if this is a remote fault
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Remote(data) => Some(data.code),
            _ => None,
        }
    }

    /// Whether repeating the same call could reasonably succeed
    ///
    /// Only timeouts and transport failures qualify. The client never
    /// retries on its own.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Transport(_))
    }
}

/// The `error` member of a failed response
///
/// `code` and `message` are required on the wire, `data` is optional and
/// passed through untouched.
///
/// # Examples
///
/// ```rust
/// use caserpc_core::JsonRpcErrorData;
/// use serde_json::json;
///
/// let error = JsonRpcErrorData::method_not_found("getProjectById");
/// assert_eq!(error.code, -32601);
///
/// let custom = JsonRpcErrorData::with_data(1001, "Project locked", json!({"project_id": 7}));
/// assert!(custom.data.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Server-chosen code; -32768..=-32000 is the protocol's own range
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Optional additional error information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Code servers answer with for an unknown method name
    pub const METHOD_NOT_FOUND: i32 = -32601;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// The error an in-memory transport reports for a method it lacks
    ///
    /// ```rust
    /// use caserpc_core::JsonRpcErrorData;
    ///
    /// let error = JsonRpcErrorData::method_not_found("getBoard");
    /// assert_eq!(error.message, "Method not found: getBoard");
    /// ```
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            Self::METHOD_NOT_FOUND,
            format!("Method not found: {}", method.into()),
        )
    }
}

impl fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message", e.g. "[-32601] Method not found"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_mapping() {
        let cases = vec![
            (Error::Configuration("empty token".into()), FaultKind::Configuration),
            (Error::Timeout(Duration::from_millis(100)), FaultKind::Timeout),
            (Error::Remote(JsonRpcErrorData::new(-32603, "boom")), FaultKind::Remote),
            (Error::Transport("connection refused".into()), FaultKind::Transport),
            (Error::MalformedResponse("not json".into()), FaultKind::MalformedResponse),
            (Error::Serialization("missing field".into()), FaultKind::Serialization),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind);
        }
    }

    #[test]
    fn test_code_only_for_remote() {
        let remote = Error::from(JsonRpcErrorData::new(-32601, "Method not found"));
        assert_eq!(remote.code(), Some(-32601));
        assert_eq!(Error::Transport("x".into()).code(), None);
        assert_eq!(Error::Timeout(Duration::from_secs(1)).code(), None);
    }

    #[test]
    fn test_retriable() {
        assert!(Error::Timeout(Duration::from_secs(1)).is_retriable());
        assert!(Error::Transport("reset".into()).is_retriable());
        assert!(!Error::Configuration("bad url".into()).is_retriable());
        assert!(!Error::MalformedResponse("garbage".into()).is_retriable());
        assert!(!Error::from(JsonRpcErrorData::new(-32000, "Project locked")).is_retriable());
    }

    #[test]
    fn test_remote_display_keeps_message() {
        let error = Error::from(JsonRpcErrorData::new(-32601, "Method not found"));
        let display = error.to_string();
        assert!(display.contains("-32601"));
        assert!(display.contains("Method not found"));
    }

    #[test]
    fn test_timeout_display() {
        let display = Error::Timeout(Duration::from_millis(100)).to_string();
        assert!(display.contains("100ms"));
    }

    #[test]
    fn test_fault_kind_labels() {
        assert_eq!(FaultKind::MalformedResponse.as_str(), "malformed_response");
        assert_eq!(FaultKind::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_method_not_found() {
        let error = JsonRpcErrorData::method_not_found("getBoard");
        assert_eq!(error.code, JsonRpcErrorData::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found: getBoard");
        assert!(error.data.is_none());
    }

    #[test]
    fn test_error_deserialization() {
        let json = r#"{"code":-32601,"message":"Method not found"}"#;
        let error: JsonRpcErrorData = serde_json::from_str(json).unwrap();

        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found");
        assert!(error.data.is_none());
    }

    #[test]
    fn test_error_data_keys_survive_serialization() {
        let error = JsonRpcErrorData::with_data(-32000, "Test error", json!({"task_id": 1}));

        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: JsonRpcErrorData = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, error);
        assert_eq!(deserialized.data.unwrap()["task_id"], 1);
    }
}
