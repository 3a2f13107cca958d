use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Reserved claim key carrying the expiry timestamp (epoch seconds).
pub const EXPIRY_CLAIM: &str = "exp";

/// A single claim value.
///
/// Kept closed so the signing input is well-defined: payload entries are
/// either strings or integers, and timestamps travel as epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Number(i64),
    Text(String),
}

impl ClaimValue {
    /// Encode a timestamp as an epoch-second claim.
    pub fn timestamp(at: DateTime<Utc>) -> Self {
        Self::Number(at.timestamp())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Token payload: an ordered map so serialization (and thus the signing
/// input) is deterministic for a given set of claims.
pub type Claims = BTreeMap<String, ClaimValue>;

/// Signs and verifies bearer tokens with an asymmetric RSA key pair.
///
/// Keys, algorithm and validity window are fixed at construction; the codec
/// is immutable and shared behind an `Arc`.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expiration: Duration,
}

impl JwtCodec {
    /// Build a codec from PEM-encoded RSA key material.
    ///
    /// Malformed keys are rejected here so misconfiguration surfaces at
    /// startup rather than on the first request.
    pub fn new(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        algorithm: Algorithm,
        expiration_minutes: i64,
    ) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| AuthError::KeyMaterial(format!("private key: {e}")))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem)
            .map_err(|e| AuthError::KeyMaterial(format!("public key: {e}")))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm,
            expiration: Duration::minutes(expiration_minutes),
        })
    }

    /// Sign a claims map, stamping the expiry under the reserved `exp` key.
    pub fn issue(&self, mut claims: Claims) -> Result<String, AuthError> {
        let expire = Utc::now() + self.expiration;
        claims.insert(EXPIRY_CLAIM.to_string(), ClaimValue::timestamp(expire));

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::KeyMaterial(format!("signing failed: {e}")))?;
        tracing::debug!("bearer token issued");
        Ok(token)
    }

    /// Verify signature, algorithm and expiry, returning the decoded claims.
    ///
    /// Every failure mode (bad signature, wrong algorithm, malformed token,
    /// elapsed expiry) collapses into [`AuthError::InvalidToken`] so callers
    /// cannot distinguish a forged token from an expired one.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "bearer token rejected");
            AuthError::InvalidToken
        })?;
        Ok(data.claims)
    }
}
