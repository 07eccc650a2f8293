//! # Rolegate Adapter Layer
//!
//! Store implementations for the domain's repository traits.
//!
//! ## Structure
//!
//! - `repository::in_memory` - `InMemoryStore`, for tests and ephemeral runs
//! - `repository::json_file` - `JsonFileStore`, durable JSON snapshot

pub mod repository;

pub use repository::in_memory::InMemoryStore;
pub use repository::json_file::JsonFileStore;
