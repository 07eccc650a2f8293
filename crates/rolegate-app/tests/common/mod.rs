use std::sync::Arc;

use rolegate_adapter::InMemoryStore;
use rolegate_app::{build_router, AppState};
use rolegate_usecase::{AuthorizationEngine, Authenticator};
use shared::{AuthConfig, TokenSecret};

pub const TEST_SECRET: &str = "testsecretkey";

pub fn app_with_ttl(ttl: chrono::Duration) -> axum::Router {
    let engine = AuthorizationEngine::from_store(Arc::new(InMemoryStore::new()));
    let auth = Authenticator::from_config(
        engine.user_repository(),
        &AuthConfig {
            token_secret: TokenSecret::new(TEST_SECRET),
            token_ttl: ttl,
        },
    );
    build_router(AppState::new(engine, auth))
}

pub fn app() -> axum::Router {
    app_with_ttl(chrono::Duration::hours(1))
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
