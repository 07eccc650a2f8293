//! HTTP application wiring.
//!
//! Builds the Axum router, the bearer-protected sub-router, and the shared
//! state injected into handlers.

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::{middleware, Router};
use rolegate_adapter::{InMemoryStore, JsonFileStore};
use rolegate_usecase::{AuthorizationEngine, Authenticator};
use shared::AppConfig;
use tower_http::trace::TraceLayer;

use crate::api;

#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: AuthorizationEngine,
    pub auth: Authenticator,
}

impl AppState {
    pub fn new(engine: AuthorizationEngine, auth: Authenticator) -> Self {
        Self { engine, auth }
    }
}

/// Pick the store named by the configuration and wire engine and login flow to it
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let engine = match &config.storage.data_file {
        Some(path) => {
            let store = JsonFileStore::open(path)
                .with_context(|| format!("failed to open data file {}", path.display()))?;
            tracing::info!(path = %path.display(), "using json file store");
            AuthorizationEngine::from_store(Arc::new(store))
        }
        None => {
            tracing::info!("using in-memory store");
            AuthorizationEngine::from_store(Arc::new(InMemoryStore::new()))
        }
    };
    let auth = Authenticator::from_config(engine.user_repository(), &config.auth);
    Ok(AppState::new(engine, auth))
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
            )
        });

    let protected = Router::new()
        .route("/users/me", get(api::users::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_bearer,
        ));

    Router::new()
        .route("/health", get(api::system::health))
        .route("/permissions", post(api::permissions::create_permission))
        .route(
            "/permissions/:permission_id",
            get(api::permissions::get_permission),
        )
        .route("/roles", post(api::roles::create_role))
        .route("/roles/:role_id", get(api::roles::get_role))
        .route(
            "/roles/:role_id/permissions/:permission_id",
            post(api::roles::assign_permission),
        )
        .route("/users", post(api::users::create_user))
        .route("/users/login", post(api::users::login))
        .route("/users/:user_id", get(api::users::get_user))
        .route(
            "/users/:user_id/roles/:role_id",
            post(api::users::assign_role),
        )
        .route(
            "/users/:user_id/permissions",
            get(api::users::effective_permissions),
        )
        .route(
            "/users/:user_id/permissions/:permission_name",
            get(api::users::check_permission),
        )
        .merge(protected)
        .layer(trace_layer)
        .with_state(state)
}
