//! Grant read models - a role or user with its associations resolved
//!
//! A store builds these in one coherent read so the permission check can
//! walk user → roles → permissions without going back to the store.

use std::collections::BTreeSet;

use super::permission::Permission;
use super::role::Role;
use super::user::User;

/// A role with its permissions resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrants {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl RoleGrants {
    pub fn new(role: Role, permissions: Vec<Permission>) -> Self {
        Self { role, permissions }
    }

    /// Does this role carry a permission named `name`?
    pub fn grants(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name() == name)
    }
}

/// A user with every role and every role's permissions resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserGrants {
    pub user: User,
    pub roles: Vec<RoleGrants>,
}

impl UserGrants {
    pub fn new(user: User, roles: Vec<RoleGrants>) -> Self {
        Self { user, roles }
    }

    /// Does any of the user's roles carry a permission named `name`?
    ///
    /// Stops at the first role that grants it. Role order carries no
    /// meaning; membership is the only question.
    pub fn has_permission(&self, name: &str) -> bool {
        self.roles.iter().any(|role| role.grants(name))
    }

    /// The user's closure: every permission name reachable through its roles
    pub fn permission_names(&self) -> BTreeSet<&str> {
        self.roles
            .iter()
            .flat_map(|role| role.permissions.iter().map(|p| p.name()))
            .collect()
    }
}
