//! Permission Repository - Abstract persistence for Permissions

use crate::model::id::PermissionId;
use crate::model::permission::Permission;
use crate::repository::error::RepositoryError;

/// Permission Repository Trait
pub trait PermissionRepository {
    /// Create a permission. Fails with `DuplicateName` or `Validation`.
    fn create_permission(&self, name: &str) -> Result<Permission, RepositoryError>;

    /// Find a permission by ID
    fn find_permission_by_id(&self, id: &PermissionId) -> Result<Permission, RepositoryError>;

    /// Find a permission by its unique name
    fn find_permission_by_name(&self, name: &str) -> Result<Permission, RepositoryError>;
}
