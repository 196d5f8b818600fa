//! Token gate error types.
//!
//! Every variant here represents a reason to deny the request. None of these
//! errors ever reach the invoking platform: the authorizer catches them all
//! and converts them into a Deny decision, logging the actual reason
//! server-side first.

use thiserror::Error;

/// Token gate error type.
///
/// Covers the full failure taxonomy of extraction, key resolution and
/// verification. Variants are distinguished for logging and testing; the
/// caller-facing outcome is always the same Deny decision.
#[derive(Debug, Error)]
pub enum GateError {
    /// No authorization header was present on the event.
    #[error("No authentication header")]
    MissingHeader,

    /// The header did not carry a bearer credential.
    #[error("Invalid authentication header")]
    MalformedHeader,

    /// The token is not a well-formed three-segment JWT, or its header
    /// carries no usable key ID.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The key set was fetched but contains no entry for the token's kid.
    #[error("No signing key found for kid '{0}'")]
    SigningKeyNotFound(String),

    /// The key set could not be fetched (network failure, timeout, bad
    /// status, unparseable body).
    #[error("Signing key set unavailable: {0}")]
    SigningKeyUnavailable(String),

    /// The signature does not verify against the resolved public key.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token carries an expiry claim in the past.
    #[error("Token expired")]
    ExpiredToken,

    /// The token (or the resolved key) declares an algorithm other than the
    /// single accepted one.
    #[error("Token algorithm mismatch: {0}")]
    AlgorithmMismatch(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_header() {
        assert_eq!(
            format!("{}", GateError::MissingHeader),
            "No authentication header"
        );
    }

    #[test]
    fn test_display_malformed_header() {
        assert_eq!(
            format!("{}", GateError::MalformedHeader),
            "Invalid authentication header"
        );
    }

    #[test]
    fn test_display_signing_key_not_found_includes_kid() {
        let err = GateError::SigningKeyNotFound("key-01".to_string());
        assert_eq!(format!("{}", err), "No signing key found for kid 'key-01'");
    }

    #[test]
    fn test_display_signing_key_unavailable() {
        let err = GateError::SigningKeyUnavailable("connection refused".to_string());
        assert_eq!(
            format!("{}", err),
            "Signing key set unavailable: connection refused"
        );
    }

    #[test]
    fn test_display_expired_token() {
        assert_eq!(format!("{}", GateError::ExpiredToken), "Token expired");
    }
}
