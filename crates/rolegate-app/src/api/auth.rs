//! Bearer token middleware.
//!
//! Reads `Authorization: Bearer <token>`, validates it, and stores the
//! subject as [`CurrentUser`] in the request extensions.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use rolegate_domain::UserId;

use crate::api::error::{api_unauthorized, ApiError};
use crate::app::AppState;

pub const NOT_LOGGED_IN: &str = "You are not logged in";

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

pub(crate) async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers()).ok_or_else(|| api_unauthorized(NOT_LOGGED_IN))?;
    let user_id = state.auth.authenticate(token).map_err(ApiError::from)?;

    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?;
    let value = value.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
