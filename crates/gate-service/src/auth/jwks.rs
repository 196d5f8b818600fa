//! JWKS client for fetching and caching public keys.
//!
//! Fetches the JSON Web Key Set from the configured publication URL and
//! caches it in-process with a TTL. Key rotation is picked up when the cache
//! expires; there is no explicit invalidation.
//!
//! # Security
//!
//! - Keys are cached to reduce load on the key publisher and improve latency
//! - Cache is invalidated on TTL expiry to pick up key rotations
//! - Fetches carry an explicit timeout so key resolution cannot block
//!   unboundedly; a timeout denies the request like any other fetch failure

use crate::errors::GateError;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::instrument;

/// Default cache TTL in seconds (5 minutes).
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Default fetch timeout in seconds.
const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;

/// JSON Web Key from the JWKS endpoint.
///
/// Only RSA keys are usable here; the `n`/`e` components are the canonical
/// key-material accessor for verification.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type (must be "RSA" to be usable).
    pub kty: String,

    /// Key ID - used to select the correct key for verification.
    pub kid: String,

    /// RSA modulus (base64url encoded).
    #[serde(default)]
    pub n: Option<String>,

    /// RSA public exponent (base64url encoded).
    #[serde(default)]
    pub e: Option<String>,

    /// Algorithm (should be "RS256" when present).
    #[serde(default)]
    pub alg: Option<String>,

    /// Key use (should be "sig" for signing).
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
}

/// JWKS document from the publication endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JwksDocument {
    /// List of JSON Web Keys.
    pub keys: Vec<Jwk>,
}

/// Cached key set with expiry time.
struct CachedJwks {
    /// Map of key ID to JWK.
    keys: HashMap<String, Jwk>,

    /// When this cache entry expires.
    expires_at: Instant,
}

/// JWKS client for fetching and caching public keys.
///
/// Thread-safe: concurrent resolutions for the same unseen kid may
/// redundantly fetch, but cache writes go through an `RwLock` and never
/// corrupt the structure.
pub struct JwksClient {
    /// URL to the JWKS endpoint.
    jwks_url: String,

    /// HTTP client for fetching the key set.
    http_client: reqwest::Client,

    /// Cached key set.
    cache: Arc<RwLock<Option<CachedJwks>>>,

    /// Cache TTL duration.
    cache_ttl: Duration,
}

impl JwksClient {
    /// Create a new JWKS client with default TTL and fetch timeout.
    #[must_use]
    pub fn new(jwks_url: String) -> Self {
        Self::with_policy(
            jwks_url,
            Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
        )
    }

    /// Create a new JWKS client with explicit cache TTL and fetch timeout.
    #[must_use]
    pub fn with_policy(jwks_url: String, cache_ttl: Duration, fetch_timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "gate.auth.jwks", error = %e, "Failed to build HTTP client with custom config, using defaults");
                reqwest::Client::new()
            });

        Self {
            jwks_url,
            http_client,
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    /// Get a JWK by key ID.
    ///
    /// Returns the JWK from cache if the cached key set is still fresh, or
    /// fetches the key set first if the cache is empty or expired. A kid
    /// missing from a fresh key set is not retried until the TTL elapses.
    ///
    /// # Errors
    ///
    /// Returns `GateError::SigningKeyUnavailable` if the key set cannot be
    /// fetched or parsed.
    /// Returns `GateError::SigningKeyNotFound` if the key ID has no entry.
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn get_key(&self, kid: &str) -> Result<Jwk, GateError> {
        // Check cache first
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Instant::now() {
                    if let Some(key) = cached.keys.get(kid) {
                        tracing::debug!(target: "gate.auth.jwks", kid = %kid, "JWKS cache hit");
                        return Ok(key.clone());
                    }
                    tracing::debug!(target: "gate.auth.jwks", kid = %kid, "Key not found in cached JWKS");
                    return Err(GateError::SigningKeyNotFound(kid.to_string()));
                }
            }
        }

        // Cache miss or expired - fetch a fresh key set
        self.refresh_cache().await?;

        let cache = self.cache.read().await;
        if let Some(cached) = cache.as_ref() {
            if let Some(key) = cached.keys.get(kid) {
                return Ok(key.clone());
            }
        }

        tracing::warn!(target: "gate.auth.jwks", kid = %kid, "Key not found in JWKS after refresh");
        Err(GateError::SigningKeyNotFound(kid.to_string()))
    }

    /// Refresh the cache by fetching the key set from the endpoint.
    #[instrument(skip(self))]
    async fn refresh_cache(&self) -> Result<(), GateError> {
        tracing::debug!(target: "gate.auth.jwks", url = %self.jwks_url, "Fetching JWKS");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(target: "gate.auth.jwks", error = %e, "Failed to fetch JWKS");
                GateError::SigningKeyUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::error!(
                target: "gate.auth.jwks",
                status = %response.status(),
                "JWKS endpoint returned error"
            );
            return Err(GateError::SigningKeyUnavailable(format!(
                "JWKS endpoint returned status {}",
                response.status()
            )));
        }

        let jwks: JwksDocument = response.json().await.map_err(|e| {
            tracing::error!(target: "gate.auth.jwks", error = %e, "Failed to parse JWKS response");
            GateError::SigningKeyUnavailable(e.to_string())
        })?;

        let keys: HashMap<String, Jwk> = jwks
            .keys
            .into_iter()
            .map(|key| (key.kid.clone(), key))
            .collect();

        tracing::info!(
            target: "gate.auth.jwks",
            key_count = keys.len(),
            "JWKS cache refreshed"
        );

        let mut cache = self.cache.write().await;
        *cache = Some(CachedJwks {
            keys,
            expires_at: Instant::now() + self.cache_ttl,
        });

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_jwk_deserialization() {
        let json = r#"{
            "kty": "RSA",
            "kid": "key-01",
            "n": "sNhhcDP9skyBck8iNDH9",
            "e": "AQAB",
            "alg": "RS256",
            "use": "sig"
        }"#;

        let jwk: Jwk = serde_json::from_str(json).unwrap();

        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.kid, "key-01");
        assert_eq!(jwk.n, Some("sNhhcDP9skyBck8iNDH9".to_string()));
        assert_eq!(jwk.e, Some("AQAB".to_string()));
        assert_eq!(jwk.alg, Some("RS256".to_string()));
        assert_eq!(jwk.key_use, Some("sig".to_string()));
    }

    #[test]
    fn test_jwk_deserialization_minimal() {
        // Only kty and kid are required; key material fields may be absent
        let json = r#"{
            "kty": "RSA",
            "kid": "key-02"
        }"#;

        let jwk: Jwk = serde_json::from_str(json).unwrap();

        assert_eq!(jwk.kid, "key-02");
        assert!(jwk.n.is_none());
        assert!(jwk.e.is_none());
        assert!(jwk.alg.is_none());
    }

    #[test]
    fn test_jwks_document_deserialization() {
        let json = r#"{
            "keys": [
                {"kty": "RSA", "kid": "key-1"},
                {"kty": "RSA", "kid": "key-2"}
            ]
        }"#;

        let jwks: JwksDocument = serde_json::from_str(json).unwrap();

        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys.first().unwrap().kid, "key-1");
        assert_eq!(jwks.keys.get(1).unwrap().kid, "key-2");
    }

    #[test]
    fn test_jwks_client_creation() {
        let client = JwksClient::new("http://localhost:8082/.well-known/jwks.json".to_string());
        assert_eq!(
            client.jwks_url,
            "http://localhost:8082/.well-known/jwks.json"
        );
        assert_eq!(client.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_jwks_client_custom_policy() {
        let client = JwksClient::with_policy(
            "http://localhost:8082/.well-known/jwks.json".to_string(),
            Duration::from_secs(60),
            Duration::from_secs(2),
        );
        assert_eq!(client.cache_ttl, Duration::from_secs(60));
    }
}
