//! Error taxonomy for authorization operations

use identity::{PasswordError, TokenError};
use rolegate_domain::{EntityKind, RepositoryError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("A {entity} named '{name}' already exists")]
    DuplicateName { entity: EntityKind, name: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The hashing or signing primitive itself failed
    #[error("credential error: {0}")]
    Credential(String),
}

impl RbacError {
    /// True for the failures a client should see as "not authenticated"
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            RbacError::InvalidCredentials | RbacError::TokenExpired | RbacError::InvalidSignature
        )
    }
}

impl From<RepositoryError> for RbacError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation { field, reason } => RbacError::Validation { field, reason },
            RepositoryError::DuplicateName { entity, name } => {
                RbacError::DuplicateName { entity, name }
            }
            RepositoryError::NotFound { entity, key } => RbacError::NotFound { entity, key },
            RepositoryError::Unavailable { message } => RbacError::StoreUnavailable(message),
        }
    }
}

impl From<TokenError> for RbacError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => RbacError::TokenExpired,
            TokenError::InvalidSignature => RbacError::InvalidSignature,
            TokenError::Issue(message) => RbacError::Credential(message),
        }
    }
}

impl From<PasswordError> for RbacError {
    fn from(err: PasswordError) -> Self {
        RbacError::Credential(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RbacError>;
