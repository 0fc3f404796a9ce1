// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account deletion route.

use crate::error::Result;
use crate::middleware::auth::{AuthUser, TOKEN_COOKIE};
use crate::services::account;
use crate::AppState;
use axum::{extract::State, routing::delete, Extension, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/account", delete(delete_account))
}

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub requests_deleted: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub responses_deleted: usize,
}

/// Delete the caller's profile, requests, responses and identity.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<DeleteAccountResponse>)> {
    tracing::info!(uid = %user.uid, "User-initiated account deletion");

    let deleted =
        account::delete_account(&state.db, &state.identity, &user.uid, &user.id_token).await?;

    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    Ok((
        jar,
        Json(DeleteAccountResponse {
            success: true,
            requests_deleted: deleted.requests_deleted,
            responses_deleted: deleted.responses_deleted,
        }),
    ))
}
