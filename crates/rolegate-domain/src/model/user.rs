//! User - an identity that holds roles
//!
//! The password credential is a one-way hash produced by the identity crate.
//! It is write-only from a caller's point of view: it is redacted from
//! `Debug` output and has no accessor other than the one the login flow
//! uses to verify an attempt.

use std::collections::BTreeSet;

use super::id::{RoleId, UserId};

/// Hashed password credential (never the plaintext)
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The encoded hash, for verification and persistence only
    pub fn expose_hash(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PasswordCredential([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    credential: PasswordCredential,
    roles: BTreeSet<RoleId>,
}

impl User {
    /// Create a user with an empty role set
    pub fn new(id: UserId, username: impl Into<String>, credential: PasswordCredential) -> Self {
        Self {
            id,
            username: username.into(),
            credential,
            roles: BTreeSet::new(),
        }
    }

    /// Builder: attach role ids (used by stores when rehydrating)
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credential(&self) -> &PasswordCredential {
        &self.credential
    }

    pub fn roles(&self) -> &BTreeSet<RoleId> {
        &self.roles
    }
}
