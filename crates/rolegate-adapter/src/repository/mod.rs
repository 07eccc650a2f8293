//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from rolegate-domain.

mod tables;

pub mod in_memory;
pub mod json_file;
