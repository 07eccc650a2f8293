//! Permission - a named capability
//!
//! Immutable once created. Shared by reference: many roles may carry it.

use super::id::PermissionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    id: PermissionId,
    name: String,
}

impl Permission {
    pub fn new(id: PermissionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> &PermissionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
