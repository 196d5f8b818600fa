//! Fail-closed authorization decision building.
//!
//! The authorizer is the top-level boundary: every error raised during
//! extraction or verification is caught here, logged, and converted into a
//! Deny decision. Nothing propagates to the invoking platform.

use crate::auth::{bearer, Claims, TokenVerifier};
use crate::errors::GateError;
use crate::models::{AuthorizerEvent, AuthorizerResponse};
use std::sync::Arc;
use tracing::instrument;

/// The authorization gate.
///
/// Stateless per invocation apart from the signing-key cache held inside the
/// verifier's JWKS client.
pub struct Authorizer {
    verifier: Arc<TokenVerifier>,
}

impl Authorizer {
    /// Create a new authorizer around a token verifier.
    #[must_use]
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Authorize one invocation event.
    ///
    /// Infallible by contract: on any failure the specific error is logged
    /// and the fixed Deny decision is returned. The failure reason is never
    /// embedded in the decision.
    #[instrument(skip_all, name = "gate.authorize")]
    pub async fn authorize(&self, event: &AuthorizerEvent) -> AuthorizerResponse {
        match self.verify_event(event).await {
            Ok(claims) => AuthorizerResponse::allow(claims.sub),
            Err(e) => {
                tracing::warn!(
                    target: "gate.authorizer",
                    error = %e,
                    header_present = event.authorization_token.is_some(),
                    "User not authorized"
                );
                AuthorizerResponse::deny()
            }
        }
    }

    /// Extractor then verifier, errors intact for the caller above to log.
    async fn verify_event(&self, event: &AuthorizerEvent) -> Result<Claims, GateError> {
        let token = bearer::extract_token(event.authorization_token.as_deref())?;
        self.verifier.verify(token).await
    }
}
