// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public read-only routes: home page data, seller directory, catalog.

use crate::error::{AppError, Result};
use crate::models::{Catalog, PriceStat, SellerDetail, SellerSummary};
use crate::services::{prices, sellers};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/catalog", get(get_catalog))
        .route("/api/home", get(get_home))
        .route("/api/stats/prices", get(get_price_stats))
        .route("/api/sellers", get(list_sellers))
        .route("/api/sellers/{id}", get(get_seller))
}

async fn get_catalog() -> Json<Catalog> {
    Json(Catalog::current())
}

// ─── Home ────────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HomeResponse {
    pub price_stats: Vec<PriceStat>,
    pub featured_sellers: Vec<SellerSummary>,
}

/// Price statistics plus featured sellers.
async fn get_home(State(state): State<Arc<AppState>>) -> Result<Json<HomeResponse>> {
    let (price_stats, listed) = tokio::try_join!(
        prices::load_price_stats(&state.db, chrono::Utc::now()),
        state.db.list_listed_sellers(),
    )?;

    let featured_sellers = sellers::featured(listed)
        .iter()
        .map(SellerSummary::from)
        .collect();

    Ok(Json(HomeResponse {
        price_stats,
        featured_sellers,
    }))
}

async fn get_price_stats(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PriceStat>>> {
    Ok(Json(
        prices::load_price_stats(&state.db, chrono::Utc::now()).await?,
    ))
}

// ─── Seller Directory ────────────────────────────────────────

#[derive(Deserialize)]
struct SellersQuery {
    category: Option<String>,
    region: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SellersResponse {
    pub sellers: Vec<SellerSummary>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: usize,
}

/// Treat `?region=` and `?category=` like absent filters.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Listed sellers, premium first, optionally filtered.
async fn list_sellers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SellersQuery>,
) -> Result<Json<SellersResponse>> {
    let category = non_empty(params.category);
    let region = non_empty(params.region);

    tracing::debug!(category = ?category, region = ?region, "Listing sellers");

    let mut listed = sellers::filter_sellers(
        state.db.list_listed_sellers().await?,
        category.as_deref(),
        region.as_deref(),
    );
    sellers::sort_premium_first(&mut listed);

    Ok(Json(SellersResponse {
        total: listed.len(),
        sellers: listed.iter().map(SellerSummary::from).collect(),
    }))
}

/// Seller detail. Only listed sellers are visible.
async fn get_seller(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SellerDetail>> {
    let profile = state
        .db
        .get_profile(&id)
        .await?
        .filter(|p| p.is_listed())
        .ok_or_else(|| AppError::NotFound(format!("Seller {} not found", id)))?;

    Ok(Json(SellerDetail::from(profile)))
}
