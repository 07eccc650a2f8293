//! Authorization Engine
//!
//! Create, assign and check over the three repository ports. Every
//! operation is one store call (plus hashing for user creation); the store
//! decides existence and association uniqueness, and its errors pass
//! through unchanged.

use std::sync::Arc;

use rolegate_domain::{
    PasswordCredential, Permission, PermissionId, PermissionRepository, Role, RoleGrants, RoleId,
    RoleRepository, User, UserGrants, UserId, UserRepository,
};
use tracing::{debug, info};

use crate::error::{RbacError, Result};

/// Shared handle; clones are cheap and see the same store
#[derive(Clone)]
pub struct AuthorizationEngine {
    permissions: Arc<dyn PermissionRepository + Send + Sync>,
    roles: Arc<dyn RoleRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl AuthorizationEngine {
    pub fn new(
        permissions: Arc<dyn PermissionRepository + Send + Sync>,
        roles: Arc<dyn RoleRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        Self {
            permissions,
            roles,
            users,
        }
    }

    /// Wire all three ports to one store
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PermissionRepository + RoleRepository + UserRepository + Send + Sync + 'static,
    {
        Self::new(store.clone(), store.clone(), store)
    }

    /// The user port, for the login flow
    pub fn user_repository(&self) -> Arc<dyn UserRepository + Send + Sync> {
        self.users.clone()
    }

    // ========================================
    // Create
    // ========================================

    pub fn create_permission(&self, name: &str) -> Result<Permission> {
        let permission = self.permissions.create_permission(name)?;
        info!(permission_id = %permission.id(), name = permission.name(), "permission created");
        Ok(permission)
    }

    pub fn create_role(&self, name: &str) -> Result<Role> {
        let role = self.roles.create_role(name)?;
        info!(role_id = %role.id(), name = role.name(), "role created");
        Ok(role)
    }

    /// Hash the password and store the user with an empty role set.
    ///
    /// An empty password is rejected before any hashing or store access.
    pub fn create_user(&self, username: &str, password: &str) -> Result<User> {
        if password.is_empty() {
            return Err(RbacError::Validation {
                field: "password",
                reason: "must not be empty".to_string(),
            });
        }

        let hash = identity::hash_password(password)?;
        let user = self
            .users
            .create_user(username, PasswordCredential::new(hash))?;
        info!(user_id = %user.id(), username = user.username(), "user created");
        Ok(user)
    }

    // ========================================
    // Assign
    // ========================================

    /// Returns `true` when a new association was written
    pub fn assign_role_to_user(&self, user_id: &UserId, role_id: &RoleId) -> Result<bool> {
        let created = self.users.append_role_to_user(user_id, role_id)?;
        if created {
            info!(user_id = %user_id, role_id = %role_id, "role assigned to user");
        } else {
            debug!(user_id = %user_id, role_id = %role_id, "role already assigned");
        }
        Ok(created)
    }

    /// Returns `true` when a new association was written
    pub fn assign_permission_to_role(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<bool> {
        let created = self
            .roles
            .append_permission_to_role(role_id, permission_id)?;
        if created {
            info!(role_id = %role_id, permission_id = %permission_id, "permission assigned to role");
        } else {
            debug!(role_id = %role_id, permission_id = %permission_id, "permission already assigned");
        }
        Ok(created)
    }

    // ========================================
    // Check
    // ========================================

    /// Does any of the user's roles carry a permission named `permission_name`?
    ///
    /// Reads the store on every call. `NotFound` when the user does not
    /// exist; `Ok(false)` only when the graph was read and lacks the name.
    pub fn check_permission(&self, user_id: &UserId, permission_name: &str) -> Result<bool> {
        let grants = self.users.load_user_with_roles_and_permissions(user_id)?;
        let allowed = grants.has_permission(permission_name);
        debug!(user_id = %user_id, permission = permission_name, allowed, "permission checked");
        Ok(allowed)
    }

    // ========================================
    // Read
    // ========================================

    pub fn find_permission(&self, id: &PermissionId) -> Result<Permission> {
        Ok(self.permissions.find_permission_by_id(id)?)
    }

    pub fn role_grants(&self, id: &RoleId) -> Result<RoleGrants> {
        Ok(self.roles.load_role_with_permissions(id)?)
    }

    pub fn user_grants(&self, id: &UserId) -> Result<UserGrants> {
        Ok(self.users.load_user_with_roles_and_permissions(id)?)
    }

    /// Sorted, deduplicated permission names reachable from the user
    pub fn effective_permissions(&self, user_id: &UserId) -> Result<Vec<String>> {
        let grants = self.users.load_user_with_roles_and_permissions(user_id)?;
        Ok(grants
            .permission_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

impl std::fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationEngine").finish_non_exhaustive()
    }
}
