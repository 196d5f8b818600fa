//! Token gate configuration.
//!
//! Configuration is loaded from environment variables. `from_vars` exists so
//! tests can exercise parsing and validation without touching the process
//! environment.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default JWKS cache TTL in seconds (5 minutes).
pub const DEFAULT_JWKS_CACHE_TTL_SECONDS: u64 = 300;

/// Default timeout for JWKS fetches in seconds.
pub const DEFAULT_JWKS_FETCH_TIMEOUT_SECONDS: u64 = 10;

/// Default clock skew tolerance in seconds for exp validation.
pub const DEFAULT_CLOCK_SKEW_SECONDS: u64 = 60;

/// Maximum allowed clock skew tolerance (10 minutes).
///
/// Prevents misconfiguration that would effectively disable expiry checks.
pub const MAX_CLOCK_SKEW_SECONDS: u64 = 600;

/// Token gate configuration.
///
/// Loaded from environment variables with sensible defaults. Only the JWKS
/// URL is required.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the JWKS publication endpoint used for token validation.
    pub jwks_url: String,

    /// How long a fetched key set stays valid in the in-process cache.
    pub jwks_cache_ttl_seconds: u64,

    /// Timeout imposed on each JWKS fetch.
    pub jwks_fetch_timeout_seconds: u64,

    /// Clock skew tolerance in seconds applied to exp validation.
    pub clock_skew_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWKS cache TTL configuration: {0}")]
    InvalidJwksCacheTtl(String),

    #[error("Invalid JWKS fetch timeout configuration: {0}")]
    InvalidJwksFetchTimeout(String),

    #[error("Invalid clock skew configuration: {0}")]
    InvalidClockSkew(String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `AUTH_URL` is missing or any numeric value
    /// fails parsing or range validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `AUTH_URL` is missing or any numeric value
    /// fails parsing or range validation.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let jwks_url = vars
            .get("AUTH_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUTH_URL".to_string()))?
            .clone();

        let jwks_cache_ttl_seconds = parse_positive_u64(
            vars,
            "JWKS_CACHE_TTL_SECONDS",
            DEFAULT_JWKS_CACHE_TTL_SECONDS,
            ConfigError::InvalidJwksCacheTtl,
        )?;

        let jwks_fetch_timeout_seconds = parse_positive_u64(
            vars,
            "JWKS_FETCH_TIMEOUT_SECONDS",
            DEFAULT_JWKS_FETCH_TIMEOUT_SECONDS,
            ConfigError::InvalidJwksFetchTimeout,
        )?;

        let clock_skew_seconds = parse_positive_u64(
            vars,
            "JWT_CLOCK_SKEW_SECONDS",
            DEFAULT_CLOCK_SKEW_SECONDS,
            ConfigError::InvalidClockSkew,
        )?;

        if clock_skew_seconds > MAX_CLOCK_SKEW_SECONDS {
            return Err(ConfigError::InvalidClockSkew(format!(
                "JWT_CLOCK_SKEW_SECONDS must not exceed {} seconds, got {}",
                MAX_CLOCK_SKEW_SECONDS, clock_skew_seconds
            )));
        }

        Ok(Self {
            jwks_url,
            jwks_cache_ttl_seconds,
            jwks_fetch_timeout_seconds,
            clock_skew_seconds,
        })
    }
}

/// Parse an optional positive integer variable, falling back to a default.
fn parse_positive_u64(
    vars: &HashMap<String, String>,
    name: &str,
    default: u64,
    make_error: fn(String) -> ConfigError,
) -> Result<u64, ConfigError> {
    let Some(value_str) = vars.get(name) else {
        return Ok(default);
    };

    let value: u64 = value_str.parse().map_err(|e| {
        make_error(format!(
            "{} must be a valid integer, got '{}': {}",
            name, value_str, e
        ))
    })?;

    if value == 0 {
        return Err(make_error(format!("{} must be positive, got 0", name)));
    }

    Ok(value)
}
