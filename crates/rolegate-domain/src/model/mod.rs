//! Domain Models - The vocabulary of Rolegate
//!
//! Permission, Role and User are entities (they have identity).
//! The grant types are read models assembled by a store in one read.

pub mod grants;
pub mod id;
pub mod name;
pub mod permission;
pub mod role;
pub mod user;
