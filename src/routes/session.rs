// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session and profile routes for the signed-in user.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::forms::{CompleteProfileForm, SellerProfileForm};
use crate::models::{Profile, ProfileResponse};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/profile", post(complete_profile))
        .route("/api/sellers/me", put(update_seller_profile))
}

/// Explicit session state for the frontend.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub uid: String,
    pub email: Option<String>,
    /// Signed in, but the profile was never completed
    pub needs_profile: bool,
    pub profile: Option<ProfileResponse>,
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionResponse>> {
    let profile = state.db.get_profile(&user.uid).await?;

    Ok(Json(SessionResponse {
        uid: user.uid,
        email: user.email,
        needs_profile: profile.is_none(),
        profile: profile.map(ProfileResponse::from),
    }))
}

/// Create the profile after a first federated sign-in.
async fn complete_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<CompleteProfileForm>,
) -> Result<(StatusCode, Json<ProfileResponse>)> {
    form.validate_form()?;

    if state.db.get_profile(&user.uid).await?.is_some() {
        return Err(AppError::Conflict("이미 프로필이 등록되어 있습니다".to_string()));
    }

    // Some federated tokens omit the e-mail claim; the account record has it
    let email = match user.email {
        Some(email) => email,
        None => state
            .identity
            .lookup(&user.id_token)
            .await?
            .email
            .ok_or_else(|| AppError::BadRequest("Signed-in account has no e-mail".to_string()))?,
    };

    let profile = Profile::new(
        user.uid,
        email,
        form.name.trim(),
        form.company.trim(),
        form.user_type,
        chrono::Utc::now(),
    );
    state.db.upsert_profile(&profile).await?;

    tracing::info!(uid = %profile.id, user_type = profile.user_type.as_str(), "Profile completed");

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

/// Edit the caller's seller profile. Completing it lists the seller.
async fn update_seller_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<SellerProfileForm>,
) -> Result<Json<ProfileResponse>> {
    form.validate_form()?;

    let mut profile = state
        .db
        .get_profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    if !profile.is_seller() {
        return Err(AppError::Forbidden(
            "판매자 회원만 이용할 수 있습니다".to_string(),
        ));
    }

    // Only the listing fields are written; premium and admin stay as stored
    profile.categories = form.unique_categories();
    profile.region = Some(form.region.clone());
    profile.phone = form.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
    profile.description = form
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    profile.profile_complete = true;

    state.db.update_seller_listing(&profile).await?;

    tracing::info!(
        uid = %profile.id,
        categories = profile.categories.len(),
        "Seller profile updated"
    );

    Ok(Json(ProfileResponse::from(profile)))
}
