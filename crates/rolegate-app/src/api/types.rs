//! HTTP API request/response types.
//!
//! Views are built from domain values; none of them carries a password or
//! a password hash.

use rolegate_domain::{Permission, Role, RoleGrants, User, UserGrants};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Body for `POST /permissions` and `POST /roles`
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    #[serde(default)]
    pub name: String,
}

/// Body for `POST /users` and `POST /users/login`
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionView {
    pub id: String,
    pub name: String,
}

impl From<&Permission> for PermissionView {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id().to_string(),
            name: permission.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleView {
    pub id: String,
    pub name: String,
    pub permissions: Vec<PermissionView>,
}

impl From<&Role> for RoleView {
    /// A freshly created role: no permissions yet
    fn from(role: &Role) -> Self {
        Self {
            id: role.id().to_string(),
            name: role.name().to_string(),
            permissions: Vec::new(),
        }
    }
}

impl From<&RoleGrants> for RoleView {
    fn from(grants: &RoleGrants) -> Self {
        Self {
            id: grants.role.id().to_string(),
            name: grants.role.name().to_string(),
            permissions: grants.permissions.iter().map(PermissionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub roles: Vec<RoleView>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            roles: Vec::new(),
        }
    }
}

impl From<&UserGrants> for UserView {
    fn from(grants: &UserGrants) -> Self {
        Self {
            id: grants.user.id().to_string(),
            username: grants.user.username().to_string(),
            roles: grants.roles.iter().map(RoleView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub message: String,
    /// `false` when the association already existed
    pub created: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
    pub user_id: String,
    pub permission: String,
    pub has_permission: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectivePermissionsResponse {
    pub user_id: String,
    pub permissions: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}
