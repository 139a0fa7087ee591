//! HTTP Basic authorization for JSON-RPC endpoints
//!
//! API-token authentication sends the fixed identity `jsonrpc` with the
//! token as the credential, encoded as `Basic base64("jsonrpc:<token>")`.
//! User-credential authentication uses the same scheme with a real
//! username and password.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// Identity used for API-token authentication.
pub const API_TOKEN_USER: &str = "jsonrpc";

/// Build the `Authorization` header value for an API token.
///
/// ```rust
/// use caserpc_core::basic_auth_header;
///
/// assert_eq!(basic_auth_header("secret"), "Basic anNvbnJwYzpzZWNyZXQ=");
/// ```
pub fn basic_auth_header(token: &str) -> String {
    BasicAuth::api_token(token).header_value()
}

/// Username/secret pair rendered as an HTTP Basic header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    secret: String,
}

impl BasicAuth {
    /// Credentials for an explicit user.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Credentials for application-level API token access.
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::new(API_TOKEN_USER, token)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// True when no secret was supplied.
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    /// Render the complete header value, scheme label included.
    pub fn header_value(&self) -> String {
        let credential = format!("{}:{}", self.username, self.secret);
        format!("Basic {}", STANDARD.encode(credential))
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(header: &str) -> String {
        let encoded = header.strip_prefix("Basic ").expect("scheme label");
        String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
    }

    #[test]
    fn test_api_token_header() {
        let header = basic_auth_header("19ffd9709d03ce50675c3a43d1c49c1ac207f4bc45f06c5b2701fbdf8929");
        assert!(header.starts_with("Basic "));
        assert_eq!(
            decode(&header),
            "jsonrpc:19ffd9709d03ce50675c3a43d1c49c1ac207f4bc45f06c5b2701fbdf8929"
        );
    }

    #[test]
    fn test_known_encoding() {
        assert_eq!(basic_auth_header("secret"), "Basic anNvbnJwYzpzZWNyZXQ=");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(basic_auth_header("abc"), basic_auth_header("abc"));
        assert_ne!(basic_auth_header("abc"), basic_auth_header("abd"));
    }

    #[test]
    fn test_user_credentials() {
        let auth = BasicAuth::new("admin", "p@ss:word");
        assert_eq!(auth.username(), "admin");
        assert_eq!(decode(&auth.header_value()), "admin:p@ss:word");
    }

    #[test]
    fn test_empty_detection() {
        assert!(BasicAuth::api_token("").is_empty());
        assert!(!BasicAuth::api_token("t").is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", BasicAuth::api_token("very-secret"));
        assert!(debug.contains("jsonrpc"));
        assert!(!debug.contains("very-secret"));
    }
}
