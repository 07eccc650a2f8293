//! Bearer tokens
//!
//! An HS256 JWT carrying `sub` (the subject id), `iat`, `nbf` and `exp`.
//! Validation checks the signature before the expiry, so a token signed with
//! another secret is always `InvalidSignature`, even when it is also stale.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature does not verify, or the token is not a well-formed JWT
    #[error("invalid token signature")]
    InvalidSignature,

    /// Signature verifies but the expiry has passed
    #[error("token has expired")]
    Expired,

    #[error("failed to issue token: {0}")]
    Issue(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// Sign a token for `subject` that expires `ttl` after now
pub fn generate_token(
    ttl: chrono::Duration,
    subject: &str,
    secret: &[u8],
) -> Result<String, TokenError> {
    generate_token_at(Utc::now(), ttl, subject, secret)
}

/// Sign a token as if issued at `now`
pub fn generate_token_at(
    now: DateTime<Utc>,
    ttl: chrono::Duration,
    subject: &str,
    secret: &[u8],
) -> Result<String, TokenError> {
    let issued_at = now.timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        iat: issued_at,
        nbf: issued_at,
        exp: issued_at.saturating_add(ttl.num_seconds()),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Issue(e.to_string()))
}

/// Verify a token against the current clock and return its subject
pub fn validate_token(token: &str, secret: &[u8]) -> Result<String, TokenError> {
    validate_token_at(token, secret, Utc::now())
}

/// Verify a token against the clock value `now` and return its subject
pub fn validate_token_at(
    token: &str,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the caller's clock.
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(
        |e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature,
        },
    )?;

    if now.timestamp() > data.claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(data.claims.sub)
}

/// Token issuer bound to one secret and one lifetime
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    ttl: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: chrono::Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        generate_token(self.ttl, subject, &self.secret)
    }

    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        validate_token(token, &self.secret)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
