//! Role - a named bundle of permissions
//!
//! A role references permissions by id; it does not own them.
//! The permission set starts empty and only grows through assignment.

use std::collections::BTreeSet;

use super::id::{PermissionId, RoleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    id: RoleId,
    name: String,
    permissions: BTreeSet<PermissionId>,
}

impl Role {
    /// Create a role with an empty permission set
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Builder: attach permission ids (used by stores when rehydrating)
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = PermissionId>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    pub fn id(&self) -> &RoleId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permissions(&self) -> &BTreeSet<PermissionId> {
        &self.permissions
    }

    pub fn has_permission_id(&self, id: &PermissionId) -> bool {
        self.permissions.contains(id)
    }
}
