//! # Rolegate Application
//!
//! HTTP request boundary and operator commands around the authorization
//! core. Handlers translate between JSON and engine calls; they hold no
//! authorization logic of their own.

pub mod api;
pub mod app;
pub mod commands;

pub use app::{build_router, build_state, AppState};
