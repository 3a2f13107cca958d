//! Token issuance and verification.

pub mod jwt;

pub use jwt::{ClaimValue, Claims, JwtCodec, EXPIRY_CLAIM};

use thiserror::Error;

/// Authentication failures.
///
/// Verification problems deliberately collapse into one kind: callers never
/// learn whether a token was forged, malformed or merely expired.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid key material: {0}")]
    KeyMaterial(String),
}
