//! Token Gate Service Library
//!
//! A token-based access-control gate that sits in front of a protected API.
//! Given an inbound bearer token it verifies the token against a remote
//! JWKS-published RSA key and returns an Allow/Deny policy document for the
//! gateway.
//!
//! # Architecture
//!
//! Three components, composed linearly per invocation:
//!
//! ```text
//! auth::bearer (extractor) -> auth::jwt (verifier) -> authorizer (decision)
//! ```
//!
//! The only cross-invocation state is the TTL-cached signing-key set held by
//! [`auth::JwksClient`]. Every failure anywhere in the chain collapses to a
//! Deny decision at the [`authorizer::Authorizer`] boundary; no error ever
//! escapes to the invoking platform.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - The verification failure taxonomy
//! - `auth` - Bearer extraction, JWKS resolution, JWT verification
//! - `models` - Invocation event and policy-document wire types
//! - `authorizer` - Fail-closed decision builder

pub mod auth;
pub mod authorizer;
pub mod config;
pub mod errors;
pub mod models;

pub use authorizer::Authorizer;
pub use config::Config;
pub use errors::GateError;
