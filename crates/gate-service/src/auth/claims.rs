//! Decoded JWT claims.
//!
//! The `sub` field becomes the downstream principal identity and is redacted
//! in Debug output to keep it out of logs. All other claims are carried
//! opaquely.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims from a successfully verified token.
///
/// `sub` and `exp` are the only claims the gate interprets; everything else
/// the token carries is passed through unchanged in `extra`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the principal identity. Redacted in Debug output.
    pub sub: String,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// All remaining claims, carried opaquely.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Custom Debug implementation that redacts the `sub` field.
impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("exp", &self.exp)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}
