//! Role API handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rolegate_domain::{PermissionId, RoleId};

use crate::api::blocking;
use crate::api::error::ApiError;
use crate::api::types::{AssignmentResponse, NameRequest, RoleView};
use crate::app::AppState;

pub(crate) async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<NameRequest>,
) -> Result<(StatusCode, Json<RoleView>), ApiError> {
    let engine = state.engine.clone();
    let role = blocking(move || engine.create_role(&body.name)).await?;
    Ok((StatusCode::CREATED, Json(RoleView::from(&role))))
}

pub(crate) async fn get_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<Json<RoleView>, ApiError> {
    let engine = state.engine.clone();
    let id = RoleId::new(role_id);
    let grants = blocking(move || engine.role_grants(&id)).await?;
    Ok(Json(RoleView::from(&grants)))
}

pub(crate) async fn assign_permission(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(String, String)>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let engine = state.engine.clone();
    let role_id = RoleId::new(role_id);
    let permission_id = PermissionId::new(permission_id);
    let created =
        blocking(move || engine.assign_permission_to_role(&role_id, &permission_id)).await?;

    let message = if created {
        "Permission assigned to role"
    } else {
        "Permission already assigned to role"
    };
    Ok(Json(AssignmentResponse {
        message: message.to_string(),
        created,
    }))
}
