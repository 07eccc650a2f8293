//! In-Memory Store
//!
//! Implements all three repository traits over one set of tables.
//! Thread-safe: clones share the same tables behind an `RwLock`, and every
//! append happens under the write lock, so concurrent assignments can
//! neither lose a write nor duplicate a row.

use std::sync::{Arc, RwLock};

use rolegate_domain::RepositoryError;

use super::tables::{impl_repositories, Tables};

/// In-memory store for permissions, roles, users and their associations
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(
        &self,
        op: impl FnOnce(&Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::unavailable("Failed to acquire read lock"))?;
        op(&tables)
    }

    fn write<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::unavailable("Failed to acquire write lock"))?;
        op(&mut tables)
    }
}

impl_repositories!(InMemoryStore);

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_domain::{
        EntityKind, PasswordCredential, PermissionId, PermissionRepository, RoleId,
        RoleRepository, UserId, UserRepository,
    };

    fn credential() -> PasswordCredential {
        PasswordCredential::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
    }

    #[test]
    fn test_create_and_find_permission() {
        let store = InMemoryStore::new();

        let created = store.create_permission("manage_users").unwrap();
        let found = store.find_permission_by_id(created.id()).unwrap();

        assert_eq!(found, created);
        assert_eq!(found.name(), "manage_users");
        assert_eq!(store.find_permission_by_name("manage_users").unwrap(), created);
    }

    #[test]
    fn test_duplicate_names() {
        let store = InMemoryStore::new();

        store.create_permission("read").unwrap();
        let err = store.create_permission("read").unwrap_err();
        assert_eq!(
            err,
            RepositoryError::DuplicateName {
                entity: EntityKind::Permission,
                name: "read".to_string()
            }
        );

        store.create_role("admin").unwrap();
        assert!(matches!(
            store.create_role(" admin "),
            Err(RepositoryError::DuplicateName { entity: EntityKind::Role, .. })
        ));

        store.create_user("alice", credential()).unwrap();
        assert!(matches!(
            store.create_user("alice", credential()),
            Err(RepositoryError::DuplicateName { entity: EntityKind::User, .. })
        ));
    }

    #[test]
    fn test_same_name_across_entity_kinds() {
        let store = InMemoryStore::new();

        store.create_permission("admin").unwrap();
        store.create_role("admin").unwrap();
        store.create_user("admin", credential()).unwrap();
    }

    #[test]
    fn test_empty_names_rejected() {
        let store = InMemoryStore::new();

        assert!(matches!(
            store.create_permission(""),
            Err(RepositoryError::Validation { .. })
        ));
        assert!(matches!(
            store.create_role("   "),
            Err(RepositoryError::Validation { .. })
        ));
        assert!(matches!(
            store.create_user("", credential()),
            Err(RepositoryError::Validation { field: "username", .. })
        ));

        // Nothing was written, so the sequence did not advance.
        let first = store.create_permission("read").unwrap();
        assert_eq!(first.id().as_str(), "1");
    }

    #[test]
    fn test_not_found() {
        let store = InMemoryStore::new();

        assert_eq!(
            store.find_role_by_id(&RoleId::new("99")).unwrap_err(),
            RepositoryError::not_found(EntityKind::Role, "99")
        );
        assert!(matches!(
            store.find_user_by_username("nobody"),
            Err(RepositoryError::NotFound { entity: EntityKind::User, .. })
        ));
        assert!(matches!(
            store.find_permission_by_id(&PermissionId::new("1")),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_append_validates_both_sides() {
        let store = InMemoryStore::new();
        let role = store.create_role("viewer").unwrap();
        let perm = store.create_permission("read").unwrap();

        assert!(matches!(
            store.append_permission_to_role(&RoleId::new("42"), perm.id()),
            Err(RepositoryError::NotFound { entity: EntityKind::Role, .. })
        ));
        assert!(matches!(
            store.append_permission_to_role(role.id(), &PermissionId::new("42")),
            Err(RepositoryError::NotFound { entity: EntityKind::Permission, .. })
        ));

        let user = store.create_user("alice", credential()).unwrap();
        assert!(matches!(
            store.append_role_to_user(&UserId::new("42"), role.id()),
            Err(RepositoryError::NotFound { entity: EntityKind::User, .. })
        ));
        assert!(matches!(
            store.append_role_to_user(user.id(), &RoleId::new("42")),
            Err(RepositoryError::NotFound { entity: EntityKind::Role, .. })
        ));
    }

    #[test]
    fn test_append_is_idempotent() {
        let store = InMemoryStore::new();
        let role = store.create_role("viewer").unwrap();
        let perm = store.create_permission("read").unwrap();
        let user = store.create_user("alice", credential()).unwrap();

        assert!(store.append_permission_to_role(role.id(), perm.id()).unwrap());
        assert!(!store.append_permission_to_role(role.id(), perm.id()).unwrap());
        assert!(store.append_role_to_user(user.id(), role.id()).unwrap());
        assert!(!store.append_role_to_user(user.id(), role.id()).unwrap());

        let role = store.find_role_by_id(role.id()).unwrap();
        assert_eq!(role.permissions().len(), 1);

        let grants = store.load_user_with_roles_and_permissions(user.id()).unwrap();
        assert_eq!(grants.roles.len(), 1);
        assert_eq!(grants.roles[0].permissions.len(), 1);
    }

    #[test]
    fn test_deep_read() {
        let store = InMemoryStore::new();
        let read = store.create_permission("read").unwrap();
        let write = store.create_permission("write").unwrap();
        let viewer = store.create_role("viewer").unwrap();
        let editor = store.create_role("editor").unwrap();
        let user = store.create_user("alice", credential()).unwrap();

        store.append_permission_to_role(viewer.id(), read.id()).unwrap();
        store.append_permission_to_role(editor.id(), read.id()).unwrap();
        store.append_permission_to_role(editor.id(), write.id()).unwrap();
        store.append_role_to_user(user.id(), viewer.id()).unwrap();
        store.append_role_to_user(user.id(), editor.id()).unwrap();

        let grants = store.load_user_with_roles_and_permissions(user.id()).unwrap();
        assert_eq!(grants.user.username(), "alice");
        assert_eq!(grants.roles.len(), 2);
        assert!(grants.has_permission("write"));
        assert_eq!(
            grants.permission_names().into_iter().collect::<Vec<_>>(),
            vec!["read", "write"]
        );
    }

    #[test]
    fn test_clones_share_tables() {
        let store = InMemoryStore::new();
        let other = store.clone();

        let perm = store.create_permission("read").unwrap();
        assert_eq!(other.find_permission_by_id(perm.id()).unwrap(), perm);
    }

    #[test]
    fn test_concurrent_duplicate_appends() {
        let store = InMemoryStore::new();
        let role = store.create_role("viewer").unwrap();
        let perm = store.create_permission("read").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let role_id = role.id().clone();
                let perm_id = perm.id().clone();
                std::thread::spawn(move || {
                    store.append_permission_to_role(&role_id, &perm_id).unwrap()
                })
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(inserted, 1);
        let roles = store.tables.read().unwrap();
        assert_eq!(roles.association_rows(), (1, 0));
    }

    #[test]
    fn test_stored_credential_is_kept() {
        let store = InMemoryStore::new();
        let user = store.create_user("alice", credential()).unwrap();

        let found = store.find_user_by_username("alice").unwrap();
        assert_eq!(found.id(), user.id());
        assert_eq!(found.credential(), &credential());
    }
}
