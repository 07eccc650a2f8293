//! User Repository - Abstract persistence for Users and `user_roles`

use crate::model::grants::UserGrants;
use crate::model::id::{RoleId, UserId};
use crate::model::user::{PasswordCredential, User};
use crate::repository::error::RepositoryError;

/// User Repository Trait
///
/// Used by the authorization engine for assignment and checks, and by the
/// login flow for username lookup.
pub trait UserRepository {
    /// Create a user with an empty role set
    fn create_user(
        &self,
        username: &str,
        credential: PasswordCredential,
    ) -> Result<User, RepositoryError>;

    /// Find a user by ID
    fn find_user_by_id(&self, id: &UserId) -> Result<User, RepositoryError>;

    /// Find a user by unique username
    fn find_user_by_username(&self, username: &str) -> Result<User, RepositoryError>;

    /// Add a role to a user. Same contract as
    /// [`RoleRepository::append_permission_to_role`](crate::RoleRepository::append_permission_to_role).
    fn append_role_to_user(&self, user_id: &UserId, role_id: &RoleId)
        -> Result<bool, RepositoryError>;

    /// Load a user with roles and each role's permissions, in one read
    fn load_user_with_roles_and_permissions(
        &self,
        id: &UserId,
    ) -> Result<UserGrants, RepositoryError>;
}
