//! CLI Commands

pub mod policy;
pub mod serve;

pub use policy::PolicyCommand;
pub use serve::ServeCommand;
