//! Bearer token authentication
//!
//! The provider authenticates app-only requests with
//! `Authorization: Bearer <token>`. The token never shows up in `Debug`
//! output or logs.

use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::fmt;

/// An app-only bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token, rejecting blank values
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(Error::missing_field("bearer_token"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw token
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Apply the token to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let token = BearerToken::new("AAAA%2Fxyz").unwrap();
        assert_eq!(token.header_value(), "Bearer AAAA%2Fxyz");
        assert_eq!(token.expose(), "AAAA%2Fxyz");
    }

    #[test]
    fn test_blank_token_rejected() {
        assert!(BearerToken::new("").is_err());
        assert!(BearerToken::new("   \n").is_err());
    }

    #[test]
    fn test_token_trimmed() {
        let token = BearerToken::new("  abc\n").unwrap();
        assert_eq!(token.expose(), "abc");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = BearerToken::new("secret-value").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-value"));
        assert_eq!(debug, "BearerToken(***)");
    }

    #[test]
    fn test_apply_sets_authorization_header() {
        let token = BearerToken::new("abc").unwrap();
        let request = token
            .apply(reqwest::Client::new().get("http://localhost/"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }
}
