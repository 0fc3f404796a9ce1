// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin routes. Guarded by `require_auth` and `require_admin` in
//! routes/mod.rs.

use crate::error::{AppError, Result};
use crate::middleware::admin::AdminUser;
use crate::models::{Dashboard, SellerSummary};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/dashboard", get(get_dashboard))
        .route("/api/admin/sellers/{id}/premium", post(toggle_premium))
}

/// Totals plus the most recent users and requests.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
) -> Result<Json<Dashboard>> {
    tracing::debug!(uid = %admin.id, "Loading admin dashboard");

    let (users, requests) =
        tokio::try_join!(state.db.list_profiles(), state.db.list_all_requests())?;

    Ok(Json(Dashboard::summarize(users, requests)))
}

/// Flip a seller's premium flag.
async fn toggle_premium(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<SellerSummary>> {
    let mut seller = state
        .db
        .get_profile(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    if !seller.is_seller() {
        return Err(AppError::BadRequest(
            "Premium applies to sellers only".to_string(),
        ));
    }

    seller.is_premium = !seller.is_premium;
    state.db.set_premium(&seller).await?;

    tracing::info!(
        admin = %admin.id,
        seller = %seller.id,
        is_premium = seller.is_premium,
        "Seller premium toggled"
    );

    Ok(Json(SellerSummary::from(&seller)))
}
