//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod error;
pub mod permissions;
pub mod roles;
pub mod system;
pub mod types;
pub mod users;

use error::{api_internal_message, ApiError};

/// Run a core operation on the blocking pool.
///
/// Store I/O and password hashing are synchronous; this keeps them off the
/// async workers so only the requesting task waits.
pub(crate) async fn blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> rolegate_usecase::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(op).await.map_err(|err| {
        tracing::error!(error = %err, "blocking task failed");
        api_internal_message("internal error")
    })?;
    result.map_err(ApiError::from)
}
