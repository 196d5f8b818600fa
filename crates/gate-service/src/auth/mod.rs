//! Authentication: bearer extraction, JWKS key resolution, JWT verification.

pub mod bearer;
pub mod claims;
pub mod jwks;
pub mod jwt;

pub use claims::Claims;
pub use jwks::JwksClient;
pub use jwt::TokenVerifier;
