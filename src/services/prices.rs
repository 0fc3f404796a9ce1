// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Loads the data behind the price statistics.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::price_stats::{compute_price_stats, lookback_start};
use crate::models::PriceStat;
use chrono::{DateTime, Utc};

/// Price statistics as of `now`.
///
/// Only responses from the lookback window are read. Requests are fetched
/// only for responses written before the category was stored on them.
pub async fn load_price_stats(
    db: &FirestoreDb,
    now: DateTime<Utc>,
) -> Result<Vec<PriceStat>, AppError> {
    let responses = db.list_responses_since(lookback_start(now)).await?;

    let mut missing: Vec<String> = responses
        .iter()
        .filter(|r| r.category.is_none())
        .map(|r| r.request_id.clone())
        .collect();
    missing.sort();
    missing.dedup();

    let request_categories = if missing.is_empty() {
        Default::default()
    } else {
        tracing::debug!(count = missing.len(), "Looking up legacy response categories");
        db.get_request_categories(&missing).await?
    };

    let stats = compute_price_stats(&responses, &request_categories, now);
    tracing::debug!(
        responses = responses.len(),
        categories = stats.len(),
        "Computed price statistics"
    );
    Ok(stats)
}
