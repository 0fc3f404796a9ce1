// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Category price statistics for the home page.
//!
//! Averages recent quote responses per part category and compares them
//! with the preceding week:
//! - current window: the last 7 days
//! - prior window: 8 to 14 days ago
//!
//! Categories without current samples are left out entirely.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::catalog::CATEGORIES;
use crate::models::QuoteResponse;

/// Length of each comparison window in days.
pub const WINDOW_DAYS: i64 = 7;

/// Aggregated prices for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PriceStat {
    pub category: String,
    /// Mean unit price over the current window (rounded)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub avg_price: i64,
    /// Percent change against the prior window (rounded)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub change_percent: i64,
    /// Mean delivery days over the current window (rounded)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub avg_delivery_days: i64,
    /// Responses in the current window
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub sample_count: usize,
}

/// Start of the oldest window that contributes to the statistics.
pub fn lookback_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(WINDOW_DAYS * 2)
}

#[derive(Default)]
struct CategorySamples {
    prices: Vec<f64>,
    delivery_days: Vec<f64>,
    prior_prices: Vec<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Compute per-category statistics.
///
/// The category of a response is its own `category` field when present,
/// otherwise the category of its request in `request_categories`. Responses
/// whose request cannot be found are skipped, as are categories outside the
/// catalog.
pub fn compute_price_stats(
    responses: &[QuoteResponse],
    request_categories: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Vec<PriceStat> {
    let current_start = now - Duration::days(WINDOW_DAYS);
    let prior_start = lookback_start(now);

    let mut samples: HashMap<&str, CategorySamples> = CATEGORIES
        .iter()
        .map(|c| (*c, CategorySamples::default()))
        .collect();

    for response in responses {
        let category = response
            .category
            .as_deref()
            .or_else(|| request_categories.get(&response.request_id).map(String::as_str));

        let Some(entry) = category.and_then(|c| samples.get_mut(c)) else {
            continue;
        };

        if response.created_at >= current_start {
            entry.prices.push(response.unit_price);
            entry.delivery_days.push(f64::from(response.delivery_days));
        } else if response.created_at >= prior_start {
            entry.prior_prices.push(response.unit_price);
        }
    }

    CATEGORIES
        .iter()
        .filter_map(|category| {
            let data = samples.get(category)?;
            let avg_price = mean(&data.prices)?.round();
            let prior_avg = mean(&data.prior_prices).unwrap_or(avg_price);

            let change_percent = if prior_avg > 0.0 {
                ((avg_price - prior_avg) / prior_avg * 100.0).round()
            } else {
                0.0
            };
            let avg_delivery_days = mean(&data.delivery_days).unwrap_or(0.0).round();

            Some(PriceStat {
                category: category.to_string(),
                avg_price: avg_price as i64,
                change_percent: change_percent as i64,
                avg_delivery_days: avg_delivery_days as i64,
                sample_count: data.prices.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(
        request_id: &str,
        category: Option<&str>,
        unit_price: f64,
        delivery_days: u32,
        days_ago: i64,
        now: DateTime<Utc>,
    ) -> QuoteResponse {
        QuoteResponse {
            id: format!("resp-{request_id}-{days_ago}-{unit_price}"),
            request_id: request_id.to_string(),
            seller_id: "seller".to_string(),
            seller_company: "서울부품공급(주)".to_string(),
            unit_price,
            total_price: unit_price,
            delivery_days,
            in_stock: true,
            note: String::new(),
            is_selected: false,
            created_at: now - Duration::days(days_ago),
            category: category.map(String::from),
        }
    }

    #[test]
    fn test_week_over_week_change() {
        let now = Utc::now();
        let responses = vec![
            make_response("r1", Some("센서"), 100.0, 2, 1, now),
            make_response("r1", Some("센서"), 200.0, 4, 2, now),
            make_response("r1", Some("센서"), 300.0, 6, 6, now),
            make_response("r2", Some("센서"), 100.0, 9, 8, now),
            make_response("r2", Some("센서"), 100.0, 9, 13, now),
        ];

        let stats = compute_price_stats(&responses, &HashMap::new(), now);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].category, "센서");
        assert_eq!(stats[0].avg_price, 200);
        assert_eq!(stats[0].change_percent, 100);
        assert_eq!(stats[0].avg_delivery_days, 4);
        assert_eq!(stats[0].sample_count, 3);
    }

    #[test]
    fn test_no_prior_samples_means_no_change() {
        let now = Utc::now();
        let responses = vec![make_response("r1", Some("PLC"), 5000.0, 3, 0, now)];

        let stats = compute_price_stats(&responses, &HashMap::new(), now);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].change_percent, 0);
        assert_eq!(stats[0].avg_price, 5000);
    }

    #[test]
    fn test_prior_only_category_is_omitted() {
        let now = Utc::now();
        let responses = vec![
            make_response("r1", Some("베어링"), 100.0, 3, 10, now),
            make_response("r2", Some("PLC"), 100.0, 3, 30, now),
        ];

        let stats = compute_price_stats(&responses, &HashMap::new(), now);

        assert!(stats.is_empty());
    }

    #[test]
    fn test_falls_back_to_request_category() {
        let now = Utc::now();
        let responses = vec![
            make_response("legacy", None, 80.0, 5, 1, now),
            make_response("dangling", None, 999.0, 5, 1, now),
        ];
        let categories = HashMap::from([("legacy".to_string(), "인버터".to_string())]);

        let stats = compute_price_stats(&responses, &categories, now);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].category, "인버터");
        assert_eq!(stats[0].avg_price, 80);
        assert_eq!(stats[0].sample_count, 1);
    }

    #[test]
    fn test_unknown_category_is_skipped() {
        let now = Utc::now();
        let responses = vec![make_response("r1", Some("서보 모터"), 100.0, 1, 1, now)];

        assert!(compute_price_stats(&responses, &HashMap::new(), now).is_empty());
    }

    #[test]
    fn test_output_follows_catalog_order() {
        let now = Utc::now();
        let responses = vec![
            make_response("r1", Some("기타"), 10.0, 1, 1, now),
            make_response("r2", Some("서보모터"), 10.0, 1, 1, now),
            make_response("r3", Some("PLC"), 10.0, 1, 1, now),
        ];

        let stats = compute_price_stats(&responses, &HashMap::new(), now);
        let order: Vec<&str> = stats.iter().map(|s| s.category.as_str()).collect();

        assert_eq!(order, vec!["서보모터", "PLC", "기타"]);
    }

    #[test]
    fn test_price_drop_is_negative() {
        let now = Utc::now();
        let responses = vec![
            make_response("r1", Some("실린더"), 75.0, 1, 1, now),
            make_response("r1", Some("실린더"), 100.0, 1, 9, now),
        ];

        let stats = compute_price_stats(&responses, &HashMap::new(), now);

        assert_eq!(stats[0].change_percent, -25);
    }
}
