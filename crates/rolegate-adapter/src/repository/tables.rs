//! Table layout shared by the store implementations
//!
//! Three entity tables keyed by id, two join tables holding id pairs, and
//! one id sequence per entity table. The join tables are ordered sets, so a
//! pair can be present at most once.

use std::collections::{BTreeMap, BTreeSet};

use rolegate_domain::{
    validate_name, EntityKind, PasswordCredential, Permission, PermissionId, RepositoryError,
    Role, RoleGrants, RoleId, User, UserGrants, UserId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Sequences {
    permission: u64,
    role: u64,
    user: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PermissionRow {
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoleRow {
    name: String,
}

#[derive(Clone, Serialize, Deserialize)]
struct UserRow {
    username: String,
    password_hash: String,
}

impl std::fmt::Debug for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRow")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    #[serde(default)]
    sequences: Sequences,
    #[serde(default)]
    permissions: BTreeMap<String, PermissionRow>,
    #[serde(default)]
    roles: BTreeMap<String, RoleRow>,
    #[serde(default)]
    users: BTreeMap<String, UserRow>,
    /// (role_id, permission_id)
    #[serde(default)]
    role_permissions: BTreeSet<(String, String)>,
    /// (user_id, role_id)
    #[serde(default)]
    user_roles: BTreeSet<(String, String)>,
}

fn next_id(counter: &mut u64) -> String {
    *counter += 1;
    counter.to_string()
}

fn check_id(field: &'static str, id: &str) -> Result<(), RepositoryError> {
    if id.trim().is_empty() {
        return Err(RepositoryError::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Right-hand ids paired with `left` in a join table
fn joined<'a>(pairs: &'a BTreeSet<(String, String)>, left: &'a str) -> impl Iterator<Item = &'a str> {
    pairs
        .range((left.to_string(), String::new())..)
        .take_while(move |(l, _)| l == left)
        .map(|(_, r)| r.as_str())
}

impl Tables {
    // ---------------------------------------------------------------- permissions

    pub(crate) fn create_permission(&mut self, name: &str) -> Result<Permission, RepositoryError> {
        let name = validate_name("name", name)?;
        if self.permissions.values().any(|row| row.name == name) {
            return Err(RepositoryError::DuplicateName {
                entity: EntityKind::Permission,
                name,
            });
        }

        let id = next_id(&mut self.sequences.permission);
        self.permissions
            .insert(id.clone(), PermissionRow { name: name.clone() });
        Ok(Permission::new(PermissionId::new(id), name))
    }

    pub(crate) fn permission(&self, id: &PermissionId) -> Result<Permission, RepositoryError> {
        check_id("permission_id", id.as_str())?;
        self.permissions
            .get(id.as_str())
            .map(|row| Permission::new(id.clone(), row.name.clone()))
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Permission, id.as_str()))
    }

    pub(crate) fn permission_by_name(&self, name: &str) -> Result<Permission, RepositoryError> {
        let name = name.trim();
        self.permissions
            .iter()
            .find(|(_, row)| row.name == name)
            .map(|(id, row)| Permission::new(PermissionId::new(id.clone()), row.name.clone()))
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Permission, name))
    }

    // ---------------------------------------------------------------- roles

    pub(crate) fn create_role(&mut self, name: &str) -> Result<Role, RepositoryError> {
        let name = validate_name("name", name)?;
        if self.roles.values().any(|row| row.name == name) {
            return Err(RepositoryError::DuplicateName {
                entity: EntityKind::Role,
                name,
            });
        }

        let id = next_id(&mut self.sequences.role);
        self.roles.insert(id.clone(), RoleRow { name: name.clone() });
        Ok(Role::new(RoleId::new(id), name))
    }

    fn role_from_row(&self, id: &str, row: &RoleRow) -> Role {
        Role::new(RoleId::new(id), row.name.clone())
            .with_permissions(joined(&self.role_permissions, id).map(PermissionId::new))
    }

    pub(crate) fn role(&self, id: &RoleId) -> Result<Role, RepositoryError> {
        check_id("role_id", id.as_str())?;
        self.roles
            .get(id.as_str())
            .map(|row| self.role_from_row(id.as_str(), row))
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Role, id.as_str()))
    }

    pub(crate) fn role_by_name(&self, name: &str) -> Result<Role, RepositoryError> {
        let name = name.trim();
        self.roles
            .iter()
            .find(|(_, row)| row.name == name)
            .map(|(id, row)| self.role_from_row(id, row))
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Role, name))
    }

    pub(crate) fn append_permission_to_role(
        &mut self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<bool, RepositoryError> {
        self.role(role_id)?;
        self.permission(permission_id)?;
        Ok(self
            .role_permissions
            .insert((role_id.to_string(), permission_id.to_string())))
    }

    pub(crate) fn role_grants(&self, id: &RoleId) -> Result<RoleGrants, RepositoryError> {
        let role = self.role(id)?;
        let permissions = role
            .permissions()
            .iter()
            .map(|pid| self.permission(pid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoleGrants::new(role, permissions))
    }

    // ---------------------------------------------------------------- users

    pub(crate) fn create_user(
        &mut self,
        username: &str,
        credential: PasswordCredential,
    ) -> Result<User, RepositoryError> {
        let username = validate_name("username", username)?;
        if self.users.values().any(|row| row.username == username) {
            return Err(RepositoryError::DuplicateName {
                entity: EntityKind::User,
                name: username,
            });
        }

        let id = next_id(&mut self.sequences.user);
        self.users.insert(
            id.clone(),
            UserRow {
                username: username.clone(),
                password_hash: credential.expose_hash().to_string(),
            },
        );
        Ok(User::new(UserId::new(id), username, credential))
    }

    fn user_from_row(&self, id: &str, row: &UserRow) -> User {
        User::new(
            UserId::new(id),
            row.username.clone(),
            PasswordCredential::new(row.password_hash.clone()),
        )
        .with_roles(joined(&self.user_roles, id).map(RoleId::new))
    }

    pub(crate) fn user(&self, id: &UserId) -> Result<User, RepositoryError> {
        check_id("user_id", id.as_str())?;
        self.users
            .get(id.as_str())
            .map(|row| self.user_from_row(id.as_str(), row))
            .ok_or_else(|| RepositoryError::not_found(EntityKind::User, id.as_str()))
    }

    pub(crate) fn user_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        let username = username.trim();
        self.users
            .iter()
            .find(|(_, row)| row.username == username)
            .map(|(id, row)| self.user_from_row(id, row))
            .ok_or_else(|| RepositoryError::not_found(EntityKind::User, username))
    }

    pub(crate) fn append_role_to_user(
        &mut self,
        user_id: &UserId,
        role_id: &RoleId,
    ) -> Result<bool, RepositoryError> {
        self.user(user_id)?;
        self.role(role_id)?;
        Ok(self
            .user_roles
            .insert((user_id.to_string(), role_id.to_string())))
    }

    pub(crate) fn user_grants(&self, id: &UserId) -> Result<UserGrants, RepositoryError> {
        let user = self.user(id)?;
        let roles = user
            .roles()
            .iter()
            .map(|rid| self.role_grants(rid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UserGrants::new(user, roles))
    }

    #[cfg(test)]
    pub(crate) fn association_rows(&self) -> (usize, usize) {
        (self.role_permissions.len(), self.user_roles.len())
    }
}

/// Implement the three repository traits for a store exposing
/// `read(|&Tables| ..)` and `write(|&mut Tables| ..)`.
macro_rules! impl_repositories {
    ($store:ty) => {
        impl rolegate_domain::PermissionRepository for $store {
            fn create_permission(
                &self,
                name: &str,
            ) -> Result<rolegate_domain::Permission, rolegate_domain::RepositoryError> {
                self.write(|t| t.create_permission(name))
            }

            fn find_permission_by_id(
                &self,
                id: &rolegate_domain::PermissionId,
            ) -> Result<rolegate_domain::Permission, rolegate_domain::RepositoryError> {
                self.read(|t| t.permission(id))
            }

            fn find_permission_by_name(
                &self,
                name: &str,
            ) -> Result<rolegate_domain::Permission, rolegate_domain::RepositoryError> {
                self.read(|t| t.permission_by_name(name))
            }
        }

        impl rolegate_domain::RoleRepository for $store {
            fn create_role(
                &self,
                name: &str,
            ) -> Result<rolegate_domain::Role, rolegate_domain::RepositoryError> {
                self.write(|t| t.create_role(name))
            }

            fn find_role_by_id(
                &self,
                id: &rolegate_domain::RoleId,
            ) -> Result<rolegate_domain::Role, rolegate_domain::RepositoryError> {
                self.read(|t| t.role(id))
            }

            fn find_role_by_name(
                &self,
                name: &str,
            ) -> Result<rolegate_domain::Role, rolegate_domain::RepositoryError> {
                self.read(|t| t.role_by_name(name))
            }

            fn append_permission_to_role(
                &self,
                role_id: &rolegate_domain::RoleId,
                permission_id: &rolegate_domain::PermissionId,
            ) -> Result<bool, rolegate_domain::RepositoryError> {
                self.write(|t| t.append_permission_to_role(role_id, permission_id))
            }

            fn load_role_with_permissions(
                &self,
                id: &rolegate_domain::RoleId,
            ) -> Result<rolegate_domain::RoleGrants, rolegate_domain::RepositoryError> {
                self.read(|t| t.role_grants(id))
            }
        }

        impl rolegate_domain::UserRepository for $store {
            fn create_user(
                &self,
                username: &str,
                credential: rolegate_domain::PasswordCredential,
            ) -> Result<rolegate_domain::User, rolegate_domain::RepositoryError> {
                self.write(|t| t.create_user(username, credential))
            }

            fn find_user_by_id(
                &self,
                id: &rolegate_domain::UserId,
            ) -> Result<rolegate_domain::User, rolegate_domain::RepositoryError> {
                self.read(|t| t.user(id))
            }

            fn find_user_by_username(
                &self,
                username: &str,
            ) -> Result<rolegate_domain::User, rolegate_domain::RepositoryError> {
                self.read(|t| t.user_by_username(username))
            }

            fn append_role_to_user(
                &self,
                user_id: &rolegate_domain::UserId,
                role_id: &rolegate_domain::RoleId,
            ) -> Result<bool, rolegate_domain::RepositoryError> {
                self.write(|t| t.append_role_to_user(user_id, role_id))
            }

            fn load_user_with_roles_and_permissions(
                &self,
                id: &rolegate_domain::UserId,
            ) -> Result<rolegate_domain::UserGrants, rolegate_domain::RepositoryError> {
                self.read(|t| t.user_grants(id))
            }
        }
    };
}

pub(crate) use impl_repositories;
