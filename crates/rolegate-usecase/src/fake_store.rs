//! Test double for the repository ports
//!
//! Vectors behind a mutex, plus a switch that makes every call fail with
//! `Unavailable` so error propagation can be observed.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use rolegate_domain::{
    validate_name, EntityKind, PasswordCredential, Permission, PermissionId,
    PermissionRepository, RepositoryError, Role, RoleGrants, RoleId, RoleRepository, User,
    UserGrants, UserId, UserRepository,
};

#[derive(Default)]
struct State {
    permissions: Vec<Permission>,
    roles: Vec<Role>,
    users: Vec<User>,
}

#[derive(Default)]
pub(crate) struct FakeStore {
    state: Mutex<State>,
    failing: AtomicBool,
    pub(crate) deep_reads: AtomicUsize,
}

impl FakeStore {
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn with<T>(&self, op: impl FnOnce(&mut State) -> Result<T, RepositoryError>) -> Result<T, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::unavailable("fake store offline"));
        }
        let mut state = self.state.lock().unwrap();
        op(&mut state)
    }
}

impl State {
    fn permission(&self, id: &PermissionId) -> Result<Permission, RepositoryError> {
        self.permissions
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Permission, id.as_str()))
    }

    fn role_index(&self, id: &RoleId) -> Result<usize, RepositoryError> {
        self.roles
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::Role, id.as_str()))
    }

    fn user_index(&self, id: &UserId) -> Result<usize, RepositoryError> {
        self.users
            .iter()
            .position(|u| u.id() == id)
            .ok_or_else(|| RepositoryError::not_found(EntityKind::User, id.as_str()))
    }

    fn role_grants(&self, id: &RoleId) -> Result<RoleGrants, RepositoryError> {
        let role = self.roles[self.role_index(id)?].clone();
        let permissions = role
            .permissions()
            .iter()
            .map(|pid| self.permission(pid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoleGrants::new(role, permissions))
    }
}

impl PermissionRepository for FakeStore {
    fn create_permission(&self, name: &str) -> Result<Permission, RepositoryError> {
        self.with(|s| {
            let name = validate_name("name", name)?;
            if s.permissions.iter().any(|p| p.name() == name) {
                return Err(RepositoryError::DuplicateName {
                    entity: EntityKind::Permission,
                    name,
                });
            }
            let p = Permission::new(PermissionId::new(format!("p{}", s.permissions.len() + 1)), name);
            s.permissions.push(p.clone());
            Ok(p)
        })
    }

    fn find_permission_by_id(&self, id: &PermissionId) -> Result<Permission, RepositoryError> {
        self.with(|s| s.permission(id))
    }

    fn find_permission_by_name(&self, name: &str) -> Result<Permission, RepositoryError> {
        self.with(|s| {
            s.permissions
                .iter()
                .find(|p| p.name() == name)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found(EntityKind::Permission, name))
        })
    }
}

impl RoleRepository for FakeStore {
    fn create_role(&self, name: &str) -> Result<Role, RepositoryError> {
        self.with(|s| {
            let name = validate_name("name", name)?;
            if s.roles.iter().any(|r| r.name() == name) {
                return Err(RepositoryError::DuplicateName {
                    entity: EntityKind::Role,
                    name,
                });
            }
            let r = Role::new(RoleId::new(format!("r{}", s.roles.len() + 1)), name);
            s.roles.push(r.clone());
            Ok(r)
        })
    }

    fn find_role_by_id(&self, id: &RoleId) -> Result<Role, RepositoryError> {
        self.with(|s| Ok(s.roles[s.role_index(id)?].clone()))
    }

    fn find_role_by_name(&self, name: &str) -> Result<Role, RepositoryError> {
        self.with(|s| {
            s.roles
                .iter()
                .find(|r| r.name() == name)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found(EntityKind::Role, name))
        })
    }

    fn append_permission_to_role(
        &self,
        role_id: &RoleId,
        permission_id: &PermissionId,
    ) -> Result<bool, RepositoryError> {
        self.with(|s| {
            let idx = s.role_index(role_id)?;
            s.permission(permission_id)?;
            if s.roles[idx].has_permission_id(permission_id) {
                return Ok(false);
            }
            let role = s.roles[idx].clone().with_permissions([permission_id.clone()]);
            s.roles[idx] = role;
            Ok(true)
        })
    }

    fn load_role_with_permissions(&self, id: &RoleId) -> Result<RoleGrants, RepositoryError> {
        self.with(|s| s.role_grants(id))
    }
}

impl UserRepository for FakeStore {
    fn create_user(
        &self,
        username: &str,
        credential: PasswordCredential,
    ) -> Result<User, RepositoryError> {
        self.with(|s| {
            let username = validate_name("username", username)?;
            if s.users.iter().any(|u| u.username() == username) {
                return Err(RepositoryError::DuplicateName {
                    entity: EntityKind::User,
                    name: username,
                });
            }
            let u = User::new(UserId::new(format!("u{}", s.users.len() + 1)), username, credential);
            s.users.push(u.clone());
            Ok(u)
        })
    }

    fn find_user_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
        self.with(|s| Ok(s.users[s.user_index(id)?].clone()))
    }

    fn find_user_by_username(&self, username: &str) -> Result<User, RepositoryError> {
        self.with(|s| {
            s.users
                .iter()
                .find(|u| u.username() == username)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found(EntityKind::User, username))
        })
    }

    fn append_role_to_user(&self, user_id: &UserId, role_id: &RoleId) -> Result<bool, RepositoryError> {
        self.with(|s| {
            let idx = s.user_index(user_id)?;
            s.role_index(role_id)?;
            if s.users[idx].roles().contains(role_id) {
                return Ok(false);
            }
            let user = s.users[idx].clone().with_roles([role_id.clone()]);
            s.users[idx] = user;
            Ok(true)
        })
    }

    fn load_user_with_roles_and_permissions(&self, id: &UserId) -> Result<UserGrants, RepositoryError> {
        self.deep_reads.fetch_add(1, Ordering::SeqCst);
        self.with(|s| {
            let user = s.users[s.user_index(id)?].clone();
            let roles = user
                .roles()
                .iter()
                .map(|rid| s.role_grants(rid))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(UserGrants::new(user, roles))
        })
    }
}
