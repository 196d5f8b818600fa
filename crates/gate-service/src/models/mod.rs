//! Wire types for the invocation contract.
//!
//! The hosting platform invokes the gate with an event carrying the raw
//! authorization header and expects an API Gateway policy document back.
//! Field names on the wire are fixed by that contract, hence the serde
//! renames.

use serde::{Deserialize, Serialize};

/// Policy document version required by the gateway.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The single action this gate authorizes.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Placeholder principal used on Deny. The caller identity is unknown or
/// untrusted at that point, so a fixed value is returned instead.
pub const DENIED_PRINCIPAL: &str = "user";

/// Invocation event from the hosting platform.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizerEvent {
    /// Raw authorization header. May be absent or malformed.
    #[serde(rename = "authorizationToken", default)]
    pub authorization_token: Option<String>,
}

/// Allow/Deny effect of a policy statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// A single policy statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyStatement {
    #[serde(rename = "Action")]
    pub action: String,

    #[serde(rename = "Effect")]
    pub effect: Effect,

    #[serde(rename = "Resource")]
    pub resource: String,
}

/// The policy document consumed by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

/// The authorization decision returned to the hosting platform.
///
/// Always structurally complete: both the principal and a one-statement
/// policy document are populated on every path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizerResponse {
    #[serde(rename = "principalId")]
    pub principal_id: String,

    #[serde(rename = "policyDocument")]
    pub policy_document: PolicyDocument,
}

impl AuthorizerResponse {
    /// Build an Allow decision for a verified principal.
    #[must_use]
    pub fn allow(principal_id: String) -> Self {
        Self::with_effect(principal_id, Effect::Allow)
    }

    /// Build the Deny decision. The principal is a fixed placeholder since
    /// the real identity is unknown at this point.
    #[must_use]
    pub fn deny() -> Self {
        Self::with_effect(DENIED_PRINCIPAL.to_string(), Effect::Deny)
    }

    fn with_effect(principal_id: String, effect: Effect) -> Self {
        Self {
            principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![PolicyStatement {
                    action: INVOKE_ACTION.to_string(),
                    effect,
                    resource: "*".to_string(),
                }],
            },
        }
    }

    /// The effect of the decision's single statement.
    #[must_use]
    pub fn effect(&self) -> Option<Effect> {
        self.policy_document.statement.first().map(|s| s.effect)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_response_wire_shape() {
        let response = AuthorizerResponse::allow("user-42".to_string());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["principalId"], "user-42");
        assert_eq!(json["policyDocument"]["Version"], "2012-10-17");
        assert_eq!(
            json["policyDocument"]["Statement"][0]["Action"],
            "execute-api:Invoke"
        );
        assert_eq!(json["policyDocument"]["Statement"][0]["Effect"], "Allow");
        assert_eq!(json["policyDocument"]["Statement"][0]["Resource"], "*");
    }

    #[test]
    fn test_deny_response_wire_shape() {
        let response = AuthorizerResponse::deny();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["principalId"], "user");
        assert_eq!(json["policyDocument"]["Statement"][0]["Effect"], "Deny");
        assert_eq!(json["policyDocument"]["Statement"][0]["Resource"], "*");
    }

    #[test]
    fn test_deny_response_is_structurally_complete() {
        let response = AuthorizerResponse::deny();

        assert_eq!(response.policy_document.statement.len(), 1);
        assert_eq!(response.effect(), Some(Effect::Deny));
    }

    #[test]
    fn test_event_deserialization() {
        let event: AuthorizerEvent =
            serde_json::from_str(r#"{"authorizationToken": "Bearer abc"}"#).unwrap();
        assert_eq!(event.authorization_token.as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_event_deserialization_null_token() {
        let event: AuthorizerEvent =
            serde_json::from_str(r#"{"authorizationToken": null}"#).unwrap();
        assert!(event.authorization_token.is_none());
    }

    #[test]
    fn test_event_deserialization_absent_token() {
        let event: AuthorizerEvent = serde_json::from_str("{}").unwrap();
        assert!(event.authorization_token.is_none());
    }
}
