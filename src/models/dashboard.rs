// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin dashboard aggregates.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::profile::ProfileResponse;
use crate::models::quote::QuoteRequestSummary;
use crate::models::{Profile, QuoteRequest};

/// Number of recent users/requests shown on the dashboard.
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardStats {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_users: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_sellers: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_buyers: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_requests: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub premium_sellers: usize,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_users: Vec<ProfileResponse>,
    pub recent_requests: Vec<QuoteRequestSummary>,
}

impl Dashboard {
    /// Summarize full user and request scans.
    pub fn summarize(mut users: Vec<Profile>, mut requests: Vec<QuoteRequest>) -> Self {
        let sellers = users.iter().filter(|u| u.is_seller());
        let stats = DashboardStats {
            total_users: users.len(),
            total_sellers: sellers.clone().count(),
            total_buyers: users.iter().filter(|u| u.is_buyer()).count(),
            total_requests: requests.len(),
            premium_sellers: sellers.filter(|s| s.is_premium).count(),
        };

        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            stats,
            recent_users: users
                .into_iter()
                .take(RECENT_LIMIT)
                .map(ProfileResponse::from)
                .collect(),
            recent_requests: requests
                .into_iter()
                .take(RECENT_LIMIT)
                .map(QuoteRequestSummary::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::NewQuoteRequest;
    use crate::models::UserType;
    use chrono::{Duration, Utc};

    fn profile(id: &str, user_type: UserType, premium: bool, age_days: i64) -> Profile {
        let mut p = Profile::new(
            id,
            format!("{id}@example.com"),
            "담당자",
            "회사",
            user_type,
            Utc::now() - Duration::days(age_days),
        );
        p.is_premium = premium;
        p
    }

    #[test]
    fn test_counts_by_role_and_premium() {
        let users = vec![
            profile("a", UserType::Seller, true, 3),
            profile("b", UserType::Seller, false, 2),
            profile("c", UserType::Buyer, false, 1),
            // Premium flag on a buyer is not a premium seller
            profile("d", UserType::Buyer, true, 0),
        ];

        let dashboard = Dashboard::summarize(users, vec![]);

        assert_eq!(
            dashboard.stats,
            DashboardStats {
                total_users: 4,
                total_sellers: 2,
                total_buyers: 2,
                total_requests: 0,
                premium_sellers: 1,
            }
        );
        let order: Vec<&str> = dashboard
            .recent_users
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(order, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_recent_lists_are_capped() {
        let buyer = profile("buyer", UserType::Buyer, false, 0);
        let users: Vec<Profile> = (0..15)
            .map(|i| profile(&format!("u{i}"), UserType::Buyer, false, i))
            .collect();
        let requests: Vec<QuoteRequest> = (0..12)
            .map(|i| {
                QuoteRequest::create(
                    format!("r{i}"),
                    &buyer,
                    NewQuoteRequest {
                        category: "센서".to_string(),
                        maker: "오므론".to_string(),
                        part_number: format!("E2E-{i}"),
                        quantity: 1,
                        desired_delivery: "협의 가능".to_string(),
                        note: String::new(),
                        is_anonymous: false,
                    },
                    Utc::now() - Duration::hours(i),
                )
            })
            .collect();

        let dashboard = Dashboard::summarize(users, requests);

        assert_eq!(dashboard.stats.total_users, 15);
        assert_eq!(dashboard.stats.total_requests, 12);
        // Totals stay in collection-length units, no narrowing
        assert_eq!(dashboard.stats.total_users, dashboard.recent_users.len() + 5);
        assert_eq!(
            serde_json::to_value(&dashboard.stats).unwrap()["total_users"],
            serde_json::json!(15)
        );
        assert_eq!(dashboard.recent_users.len(), RECENT_LIMIT);
        assert_eq!(dashboard.recent_requests.len(), RECENT_LIMIT);
        assert_eq!(dashboard.recent_requests[0].id, "r0");
    }
}
