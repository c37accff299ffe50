//! Admin guard for the banner management routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::handlers::AppState;
use crate::error::{BannerError, Result};

/// Lets the request through only for admins.
///
/// Token problems are 401; a valid non-admin token is 403.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let is_admin = state.admin_checker.check_if_admin(request.headers())?;
    if !is_admin {
        debug!(path = %request.uri().path(), "non-admin caller rejected");
        return Err(BannerError::Forbidden);
    }

    Ok(next.run(request).await)
}
