//! # Rolegate Use Case Layer
//!
//! Orchestrates the domain's repository ports and the identity primitives.
//! Nothing here knows which store is behind the traits.
//!
//! ## Components
//!
//! - `AuthorizationEngine` - create, assign and check
//! - `Authenticator` - login and bearer token validation
//! - `RbacError` - the error taxonomy every caller sees

pub mod engine;
pub mod error;
pub mod login;

#[cfg(test)]
mod fake_store;

pub use engine::AuthorizationEngine;
pub use error::{RbacError, Result};
pub use login::{Authenticator, IssuedToken};

pub use rolegate_domain;
