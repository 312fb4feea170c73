//! Token service.
//!
//! Issues and verifies signed, time-bound identity tokens (JWT, HS256).
//! The signing secret is server-held; tokens carry only the user id and
//! an expiration.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shoplist_core::UserId;

/// Errors that can occur when issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token is malformed, carries a bad signature, or encodes a bad
    /// user id.
    #[error("invalid token")]
    Invalid,

    /// Token was valid once but its expiration has passed.
    #[error("token expired")]
    Expired,

    /// Signing failed while issuing a token.
    #[error("failed to sign token")]
    Sign,
}

/// JWT claims carried by an identity token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id, as a UUID string.
    pub sub: String,
    /// Expiration, seconds since the Unix epoch.
    pub exp: usize,
}

/// Issues and verifies bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: SecretString,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service with a time-to-live expressed in days.
    #[must_use]
    pub fn new(secret: SecretString, ttl_days: i64) -> Self {
        Self::with_ttl(secret, Duration::days(ttl_days))
    }

    /// Create a token service with an explicit time-to-live.
    #[must_use]
    pub const fn with_ttl(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue a signed token for `user_id`, expiring after the configured
    /// time-to-live.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if encoding fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let exp = usize::try_from((Utc::now() + self.ttl).timestamp()).map_err(|_| TokenError::Sign)?;
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|_| TokenError::Sign)
    }

    /// Verify a token and extract the user id it asserts.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for an expired token and
    /// `TokenError::Invalid` for anything else that fails verification:
    /// malformed input, signature mismatch, or a subject that is not a
    /// UUID.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        data.claims.sub.parse().map_err(|_| TokenError::Invalid)
    }
}
