//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! One small capability trait per entity. The authorization engine depends
//! on these traits only; adapters provide implementations.
//!
//! ```text
//! Domain Layer              │  Adapter Layer
//! ──────────────────────────┼────────────────────────
//! trait RoleRepository      │  InMemoryStore
//!   fn create_role()        │  JsonFileStore
//!   fn append_permission_.. │  (test fakes)
//! ```
//!
//! Methods take `&self`: stores are shared between concurrent workers and
//! synchronize internally. The store is the authority on existence and on
//! association uniqueness.

pub mod error;
pub mod permission_repository;
pub mod role_repository;
pub mod user_repository;
