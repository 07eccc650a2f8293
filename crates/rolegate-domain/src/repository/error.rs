//! Errors surfaced by store implementations

/// Which entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Permission,
    Role,
    User,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Permission => "permission",
            EntityKind::Role => "role",
            EntityKind::User => "user",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Input rejected before any mutation (blank or over-long name, blank id)
    Validation { field: &'static str, reason: String },
    /// Unique name already taken
    DuplicateName { entity: EntityKind, name: String },
    /// No entity with this id or unique name
    NotFound { entity: EntityKind, key: String },
    /// Storage could not be read or written
    Unavailable { message: String },
}

impl RepositoryError {
    pub fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        RepositoryError::Unavailable {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::Validation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            RepositoryError::DuplicateName { entity, name } => {
                write!(f, "A {} named '{}' already exists", entity, name)
            }
            RepositoryError::NotFound { entity, key } => {
                write!(f, "{} not found: {}", entity, key)
            }
            RepositoryError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
