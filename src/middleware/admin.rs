// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin guard. Runs after [`require_auth`](super::auth::require_auth).

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::Profile;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Profile of an authenticated admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Profile);

/// Middleware that requires the caller's profile to carry the admin flag.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    let profile = state
        .db
        .get_profile(&user.uid)
        .await?
        .filter(|p| p.is_admin)
        .ok_or_else(|| {
            tracing::warn!(uid = %user.uid, "Non-admin attempted admin access");
            AppError::Forbidden("관리자 권한이 필요합니다".to_string())
        })?;

    request.extensions_mut().insert(AdminUser(profile));
    Ok(next.run(request).await)
}
