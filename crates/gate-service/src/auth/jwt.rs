//! Token verification against JWKS-published RSA keys.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Only RS256 (RSA signature with SHA-256) is accepted
//! - Expiration is validated with a small clock skew tolerance
//! - Verification is atomic: a well-shaped token earns no trust until its
//!   signature checks out against the resolved key

use crate::auth::claims::Claims;
use crate::auth::jwks::{Jwk, JwksClient};
use crate::errors::GateError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tracing::instrument;

/// Maximum allowed token size in bytes (8 KiB).
///
/// Oversized tokens are rejected before any base64 or JSON work happens.
pub const MAX_TOKEN_SIZE_BYTES: usize = 8192;

/// The single accepted JWK algorithm label.
const ACCEPTED_JWK_ALG: &str = "RS256";

/// Extract the `kid` (key ID) from a JWT header without verifying the
/// signature.
///
/// The kid is only used to look up the public key; the token must still be
/// verified against that key afterwards.
///
/// # Errors
///
/// Returns `GateError::MalformedToken` when the token is oversized, is not a
/// three-segment JWT, its header is not valid base64url JSON, or the header
/// carries no non-empty string `kid`.
pub fn extract_kid(token: &str) -> Result<String, GateError> {
    // Size check before any parsing (DoS prevention)
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        tracing::debug!(
            target: "gate.auth.jwt",
            token_size = token.len(),
            max_size = MAX_TOKEN_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(GateError::MalformedToken("token too large".to_string()));
    }

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!(
            target: "gate.auth.jwt",
            parts = parts.len(),
            "Token rejected: not a three-segment JWT"
        );
        return Err(GateError::MalformedToken(
            "not a three-segment JWT".to_string(),
        ));
    }

    let header_part = parts.first().ok_or_else(|| {
        GateError::MalformedToken("not a three-segment JWT".to_string())
    })?;
    let header_bytes = URL_SAFE_NO_PAD.decode(header_part).map_err(|e| {
        tracing::debug!(target: "gate.auth.jwt", error = %e, "Failed to decode JWT header base64");
        GateError::MalformedToken("header is not valid base64url".to_string())
    })?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "gate.auth.jwt", error = %e, "Failed to parse JWT header JSON");
        GateError::MalformedToken("header is not valid JSON".to_string())
    })?;

    // kid must be a non-empty string
    header
        .get("kid")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| GateError::MalformedToken("header has no usable kid".to_string()))
}

/// Token verifier backed by a JWKS client.
///
/// Resolves the signing key for each token's kid and verifies the signature,
/// algorithm constraint and expiry in one step.
pub struct TokenVerifier {
    /// JWKS client for resolving public keys.
    jwks_client: Arc<JwksClient>,

    /// Clock skew tolerance in seconds applied to exp validation.
    clock_skew_seconds: u64,
}

impl TokenVerifier {
    /// Create a new token verifier.
    #[must_use]
    pub fn new(jwks_client: Arc<JwksClient>, clock_skew_seconds: u64) -> Self {
        Self {
            jwks_client,
            clock_skew_seconds,
        }
    }

    /// Verify a bearer token and return its decoded claims.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` - not a usable JWT, or no kid in the header
    /// - `SigningKeyUnavailable` - the key set could not be fetched
    /// - `SigningKeyNotFound` - no usable key for the token's kid
    /// - `AlgorithmMismatch` - token or key declares something other than RS256
    /// - `ExpiredToken` - exp claim is in the past
    /// - `InvalidSignature` - signature does not verify against the key
    #[instrument(skip_all)]
    pub async fn verify(&self, token: &str) -> Result<Claims, GateError> {
        // 1. Read the kid from the unverified header
        let kid = extract_kid(token)?;

        // 2. Resolve the signing key (cached or fetched)
        let jwk = self.jwks_client.get_key(&kid).await?;

        // 3. Atomic cryptographic verification
        let claims = verify_token(token, &jwk, self.clock_skew_seconds)?;

        tracing::debug!(target: "gate.auth.jwt", "Token verified successfully");
        Ok(claims)
    }
}

/// Verify the token signature against a resolved JWK and extract claims.
///
/// RS256 only. The JWK's RSA components `n`/`e` are the canonical key
/// material; entries without them carry no usable signing key.
fn verify_token(token: &str, jwk: &Jwk, clock_skew_seconds: u64) -> Result<Claims, GateError> {
    if jwk.kty != "RSA" {
        tracing::warn!(target: "gate.auth.jwt", kty = %jwk.kty, "Unexpected JWK key type");
        return Err(GateError::AlgorithmMismatch(format!(
            "key type '{}' is not RSA",
            jwk.kty
        )));
    }
    if let Some(alg) = &jwk.alg {
        if alg != ACCEPTED_JWK_ALG {
            tracing::warn!(target: "gate.auth.jwt", alg = %alg, "Unexpected JWK algorithm");
            return Err(GateError::AlgorithmMismatch(format!(
                "key algorithm '{}' is not {}",
                alg, ACCEPTED_JWK_ALG
            )));
        }
    }

    let (modulus, exponent) = match (&jwk.n, &jwk.e) {
        (Some(n), Some(e)) => (n, e),
        _ => {
            tracing::error!(target: "gate.auth.jwt", kid = %jwk.kid, "JWK missing RSA components");
            return Err(GateError::SigningKeyNotFound(jwk.kid.clone()));
        }
    };

    let decoding_key = DecodingKey::from_rsa_components(modulus, exponent).map_err(|e| {
        tracing::error!(target: "gate.auth.jwt", kid = %jwk.kid, error = %e, "Invalid RSA components in JWK");
        GateError::SigningKeyNotFound(jwk.kid.clone())
    })?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_exp = true;
    validation.leeway = clock_skew_seconds;
    // No audience constraint in this gate
    validation.validate_aud = false;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(target: "gate.auth.jwt", error = %e, "Token verification failed");
        map_decode_error(&e)
    })?;

    Ok(token_data.claims)
}

/// Map `jsonwebtoken` decode failures onto the gate's failure taxonomy.
fn map_decode_error(err: &jsonwebtoken::errors::Error) -> GateError {
    match err.kind() {
        ErrorKind::ExpiredSignature => GateError::ExpiredToken,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            GateError::AlgorithmMismatch("token algorithm is not RS256".to_string())
        }
        ErrorKind::InvalidSignature => GateError::InvalidSignature,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => GateError::MalformedToken(err.to_string()),
        // Anything unexpected still denies
        _ => GateError::InvalidSignature,
    }
}
