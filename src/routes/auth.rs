// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! E-mail/password authentication routes.
//!
//! Credentials go to the identity provider; the returned ID token is handed
//! back to the client and also set as an HttpOnly cookie for browsers.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::middleware::auth::TOKEN_COOKIE;
use crate::models::forms::{LoginForm, RegisterForm};
use crate::models::{Profile, ProfileResponse};
use crate::services::AuthTokens;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub uid: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Seconds until `id_token` expires
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub expires_in: u64,
    /// True when the account has no profile yet
    pub needs_profile: bool,
    pub profile: Option<ProfileResponse>,
}

impl AuthResponse {
    fn new(tokens: AuthTokens, profile: Option<Profile>) -> Self {
        Self {
            uid: tokens.local_id,
            expires_in: tokens.expires_in.parse().unwrap_or(3600),
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token,
            needs_profile: profile.is_none(),
            profile: profile.map(ProfileResponse::from),
        }
    }
}

/// Build the session cookie. `Secure` is omitted for local development.
fn token_cookie(frontend_url: &str, token: String) -> Cookie<'static> {
    let local = frontend_url.starts_with("http://localhost")
        || frontend_url.starts_with("http://127.0.0.1");

    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!local)
        .build()
}

/// Sign up with e-mail and password and create the profile.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    form.validate_form()?;

    let tokens = state.identity.sign_up(&form.email, &form.password).await?;

    let profile = Profile::new(
        tokens.local_id.clone(),
        form.email.trim(),
        form.name.trim(),
        form.company.trim(),
        form.user_type,
        chrono::Utc::now(),
    );
    state.db.upsert_profile(&profile).await?;

    tracing::info!(
        uid = %profile.id,
        user_type = profile.user_type.as_str(),
        "User registered"
    );

    let jar = jar.add(token_cookie(&state.config.frontend_url, tokens.id_token.clone()));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse::new(tokens, Some(profile))),
    ))
}

/// Sign in with e-mail and password.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(form): Json<LoginForm>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    form.validate_form()?;

    let tokens = state.identity.sign_in(&form.email, &form.password).await?;
    let profile = state.db.get_profile(&tokens.local_id).await?;

    tracing::info!(
        uid = %tokens.local_id,
        needs_profile = profile.is_none(),
        "User signed in"
    );

    let jar = jar.add(token_cookie(&state.config.frontend_url, tokens.id_token.clone()));
    Ok((jar, Json(AuthResponse::new(tokens, profile))))
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    (StatusCode::NO_CONTENT, jar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_secure_outside_localhost() {
        let cookie = token_cookie("https://catchfac.co.kr", "t".to_string());
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let cookie = token_cookie("http://localhost:3000", "t".to_string());
        assert_eq!(cookie.secure(), Some(false));
    }
}
