//! Liveness endpoint.

use axum::Json;

use crate::api::types::HealthStatus;

pub(crate) async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
