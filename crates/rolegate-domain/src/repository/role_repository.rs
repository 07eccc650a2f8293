//! Role Repository - Abstract persistence for Roles and `role_permissions`

use crate::model::grants::RoleGrants;
use crate::model::id::{PermissionId, RoleId};
use crate::model::role::Role;
use crate::repository::error::RepositoryError;

/// Role Repository Trait
pub trait RoleRepository {
    /// Create a role with an empty permission set
    fn create_role(&self, name: &str) -> Result<Role, RepositoryError>;

    /// Find a role by ID
    fn find_role_by_id(&self, id: &RoleId) -> Result<Role, RepositoryError>;

    /// Find a role by its unique name
    fn find_role_by_name(&self, name: &str) -> Result<Role, RepositoryError>;

    /// Add a permission to a role.
    ///
    /// Both ids must exist (`NotFound` otherwise). The pair is unique:
    /// returns `true` when a new association was written and `false` when
    /// it was already present.
    fn append_permission_to_role(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<bool, RepositoryError>;

    /// Load a role with its permissions resolved
    fn load_role_with_permissions(&self, id: &RoleId) -> Result<RoleGrants, RepositoryError>;
}
