//! Permission API handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rolegate_domain::PermissionId;

use crate::api::blocking;
use crate::api::error::ApiError;
use crate::api::types::{NameRequest, PermissionView};
use crate::app::AppState;

pub(crate) async fn create_permission(
    State(state): State<AppState>,
    Json(body): Json<NameRequest>,
) -> Result<(StatusCode, Json<PermissionView>), ApiError> {
    let engine = state.engine.clone();
    let permission = blocking(move || engine.create_permission(&body.name)).await?;
    Ok((StatusCode::CREATED, Json(PermissionView::from(&permission))))
}

pub(crate) async fn get_permission(
    State(state): State<AppState>,
    Path(permission_id): Path<String>,
) -> Result<Json<PermissionView>, ApiError> {
    let engine = state.engine.clone();
    let id = PermissionId::new(permission_id);
    let permission = blocking(move || engine.find_permission(&id)).await?;
    Ok(Json(PermissionView::from(&permission)))
}
