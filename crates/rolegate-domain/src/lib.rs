//! # Rolegate Domain Layer
//!
//! The authorization data model: users hold roles, roles hold permissions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/      - Entities, identifiers, grant read models     ││
//! │  │  repository/ - Store ports (traits, not implementations)    ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The model is deliberately flat: no role inheritance, no wildcards.
//! A user has a permission exactly when one of its roles carries a
//! permission with that name.
//!
//! **This crate has ZERO external dependencies.**

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::{
    grants::{RoleGrants, UserGrants},
    id::{PermissionId, RoleId, UserId},
    name::{validate_name, MAX_NAME_LEN},
    permission::Permission,
    role::Role,
    user::{PasswordCredential, User},
};

pub use repository::{
    error::{EntityKind, RepositoryError},
    permission_repository::PermissionRepository,
    role_repository::RoleRepository,
    user_repository::UserRepository,
};
