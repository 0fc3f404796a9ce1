// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ID token authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie carrying the ID token for browser clients.
pub const TOKEN_COOKIE: &str = "catchfac_token";

/// Authenticated caller, inserted as a request extension.
///
/// This is the explicit session: handlers get identity from here and load
/// the profile themselves.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    /// The verified token, forwarded for provider calls made on the
    /// caller's behalf
    pub id_token: String,
}

/// Middleware that requires a valid ID token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => return Err(AppError::Unauthorized),
        }
    };

    let identity = state.id_tokens.verify(&token).await?;

    request.extensions_mut().insert(AuthUser {
        uid: identity.uid,
        email: identity.email,
        id_token: token,
    });

    Ok(next.run(request).await)
}
