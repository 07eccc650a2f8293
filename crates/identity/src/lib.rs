//! # Rolegate Identity
//!
//! Credential primitives used by the login flow.
//!
//! ## Components
//!
//! - `password` - Salted Argon2 hashing and verification
//! - `token` - HS256 bearer tokens binding a subject and an expiry

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{
    generate_token, generate_token_at, validate_token, validate_token_at, TokenError, TokenIssuer,
};
