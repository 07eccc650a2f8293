//! Login flow
//!
//! Username lookup, password verification, token issuance. The caller
//! gets a token and its lifetime, never the user record or its hash.

use std::sync::{Arc, OnceLock};

use identity::TokenIssuer;
use rolegate_domain::{RepositoryError, UserId, UserRepository};
use shared::AuthConfig;
use tracing::{debug, warn};

use crate::error::{RbacError, Result};

/// A freshly issued bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserRepository + Send + Sync>,
    issuer: TokenIssuer,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>, issuer: TokenIssuer) -> Self {
        // Pay for the decoy hash at startup, not on the first failed login.
        decoy_hash();
        Self { users, issuer }
    }

    pub fn from_config(users: Arc<dyn UserRepository + Send + Sync>, config: &AuthConfig) -> Self {
        Self::new(
            users,
            TokenIssuer::new(config.token_secret.as_bytes(), config.token_ttl),
        )
    }

    /// Exchange a username and password for a token bound to the user's id.
    ///
    /// `NotFound` for an unknown username, `InvalidCredentials` for a wrong
    /// password. Both paths run one Argon2 verification.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken> {
        let user = match self.users.find_user_by_username(username) {
            Ok(user) => user,
            Err(err @ RepositoryError::NotFound { .. }) => {
                verify_against_decoy(password);
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        if !identity::verify_password(user.credential().expose_hash(), password) {
            warn!(user_id = %user.id(), "login rejected: wrong password");
            return Err(RbacError::InvalidCredentials);
        }

        let token = self.issuer.issue(user.id().as_str())?;
        debug!(user_id = %user.id(), "token issued");

        Ok(IssuedToken {
            token,
            expires_in: self.issuer.ttl().num_seconds(),
        })
    }

    /// Validate a bearer token and return the user id it was issued to
    pub fn authenticate(&self, token: &str) -> Result<UserId> {
        match self.issuer.validate(token) {
            Ok(subject) => Ok(UserId::new(subject)),
            Err(e) => {
                warn!(reason = %e, "bearer token rejected");
                Err(e.into())
            }
        }
    }
}

/// Hash of a password no user has, verified when the username is unknown
fn decoy_hash() -> Option<&'static str> {
    static DECOY: OnceLock<Option<String>> = OnceLock::new();
    DECOY
        .get_or_init(|| identity::hash_password("rolegate-decoy-credential").ok())
        .as_deref()
}

#[cfg(test)]
static DECOY_VERIFIES: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

fn verify_against_decoy(password: &str) {
    if let Some(hash) = decoy_hash() {
        let _ = identity::verify_password(hash, password);
        #[cfg(test)]
        DECOY_VERIFIES.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
