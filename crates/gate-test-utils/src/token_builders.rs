//! Builder patterns for test token claims
//!
//! Provides a fluent API for constructing JWT claim sets in tests.

use chrono::{Duration, Utc};
use serde_json::{json, Value};

/// Builder for creating test JWT claims
///
/// # Example
/// ```rust,ignore
/// let claims = TestTokenBuilder::new()
///     .for_user("user-42")
///     .expires_in(3600)
///     .claim("scope", "read")
///     .build();
/// let token = test_keypair().sign(&claims);
/// ```
pub struct TestTokenBuilder {
    sub: String,
    exp: i64,
    iat: i64,
    extra: serde_json::Map<String, Value>,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults: a generic subject, issued
    /// now, expiring in an hour.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: "test-subject".to_string(),
            exp: (now + Duration::seconds(3600)).timestamp(),
            iat: now.timestamp(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set the subject (the principal on Allow)
    pub fn for_user(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    /// Set expiration in seconds from now (negative for already-expired)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Add an arbitrary extra claim
    pub fn claim(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    /// Build the claims as a JSON value
    pub fn build(self) -> Value {
        let mut claims = json!({
            "sub": self.sub,
            "exp": self.exp,
            "iat": self.iat,
        });
        if let Some(map) = claims.as_object_mut() {
            for (name, value) in self.extra {
                map.insert(name, value);
            }
        }
        claims
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_valid_claims() {
        let claims = TestTokenBuilder::new()
            .for_user("user-42")
            .claim("scope", "read")
            .build();

        assert_eq!(claims["sub"], "user-42");
        assert_eq!(claims["scope"], "read");
        assert!(claims["exp"].as_i64().unwrap() > claims["iat"].as_i64().unwrap());
    }

    #[test]
    fn test_builder_default() {
        let claims = TestTokenBuilder::default().build();
        assert_eq!(claims["sub"], "test-subject");
    }

    #[test]
    fn test_builder_expired_token() {
        let claims = TestTokenBuilder::new().expires_in(-3600).build();
        assert!(claims["exp"].as_i64().unwrap() < Utc::now().timestamp());
    }

    #[test]
    fn test_builder_issued_at() {
        let claims = TestTokenBuilder::new().issued_at(1_234_567_890).build();
        assert_eq!(claims["iat"], 1_234_567_890);
    }
}
