//! User API handlers: creation, assignment, checks, login.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use rolegate_domain::{RoleId, UserId};
use rolegate_usecase::RbacError;

use crate::api::auth::CurrentUser;
use crate::api::blocking;
use crate::api::error::ApiError;
use crate::api::types::{
    AssignmentResponse, CredentialsRequest, EffectivePermissionsResponse, LoginResponse,
    PermissionCheckResponse, UserView,
};
use crate::app::AppState;

pub(crate) async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let engine = state.engine.clone();
    let user = blocking(move || engine.create_user(&body.username, &body.password)).await?;
    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let engine = state.engine.clone();
    let id = UserId::new(user_id);
    let grants = blocking(move || engine.user_grants(&id)).await?;
    Ok(Json(UserView::from(&grants)))
}

pub(crate) async fn assign_role(
    State(state): State<AppState>,
    Path((user_id, role_id)): Path<(String, String)>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let engine = state.engine.clone();
    let user_id = UserId::new(user_id);
    let role_id = RoleId::new(role_id);
    let created = blocking(move || engine.assign_role_to_user(&user_id, &role_id)).await?;

    let message = if created {
        "Role assigned to user"
    } else {
        "Role already assigned to user"
    };
    Ok(Json(AssignmentResponse {
        message: message.to_string(),
        created,
    }))
}

pub(crate) async fn effective_permissions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<EffectivePermissionsResponse>, ApiError> {
    let engine = state.engine.clone();
    let id = UserId::new(user_id.clone());
    let permissions = blocking(move || engine.effective_permissions(&id)).await?;
    Ok(Json(EffectivePermissionsResponse {
        user_id,
        permissions,
    }))
}

pub(crate) async fn check_permission(
    State(state): State<AppState>,
    Path((user_id, permission)): Path<(String, String)>,
) -> Result<Json<PermissionCheckResponse>, ApiError> {
    let engine = state.engine.clone();
    let id = UserId::new(user_id.clone());
    let name = permission.clone();
    let has_permission = blocking(move || engine.check_permission(&id, &name)).await?;
    Ok(Json(PermissionCheckResponse {
        user_id,
        permission,
        has_permission,
    }))
}

/// Unknown usernames answer exactly like wrong passwords.
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let auth = state.auth.clone();
    let issued = blocking(move || {
        auth.login(&body.username, &body.password)
            .map_err(|err| match err {
                RbacError::NotFound { .. } => {
                    tracing::warn!("login rejected: unknown username");
                    RbacError::InvalidCredentials
                }
                other => other,
            })
    })
    .await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}

pub(crate) async fn current_user(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<UserView>, ApiError> {
    let engine = state.engine.clone();
    let grants = blocking(move || engine.user_grants(&user_id)).await?;
    Ok(Json(UserView::from(&grants)))
}
