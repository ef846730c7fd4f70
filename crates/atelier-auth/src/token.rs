//! Bearer tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque bearer token issued by the backend at login.
///
/// `Debug` is redacted so tokens stay out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

impl From<String> for AuthToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AuthToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        assert_eq!(AuthToken::new("abc").bearer(), "Bearer abc");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert!(!format!("{:?}", token).contains("secret"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&AuthToken::new("t1")).unwrap();
        assert_eq!(json, r#""t1""#);
    }
}
