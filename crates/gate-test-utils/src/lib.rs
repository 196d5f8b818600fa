//! # Gate Test Utilities
//!
//! Shared test utilities for the token gate service.
//!
//! This crate provides:
//! - Fixed RSA keypair fixtures (reproducible signing keys with JWK views)
//! - Test token builders (`TestTokenBuilder`)
//! - JWKS document helpers for mock key-publication endpoints
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_test_utils::{jwks_json, test_keypair, TestTokenBuilder};
//!
//! let keypair = test_keypair();
//! let token = keypair.sign(
//!     &TestTokenBuilder::new()
//!         .for_user("user-42")
//!         .expires_in(3600)
//!         .build(),
//! );
//! let jwks = jwks_json(&[&keypair]);
//! ```

pub mod crypto_fixtures;
pub mod token_builders;

pub use crypto_fixtures::*;
pub use token_builders::*;
