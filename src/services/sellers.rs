// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seller directory: filtering and premium-first ordering.

use crate::models::catalog::NATIONWIDE;
use crate::models::Profile;

/// Number of sellers featured on the home page.
pub const FEATURED_COUNT: usize = 6;

/// Whether a listed seller matches the optional category and region.
///
/// A seller covering the whole country matches every region.
pub fn matches(seller: &Profile, category: Option<&str>, region: Option<&str>) -> bool {
    if !seller.is_listed() {
        return false;
    }

    let category_ok = category.map_or(true, |c| seller.categories.iter().any(|t| t == c));
    let region_ok = region.map_or(true, |r| {
        matches!(seller.region.as_deref(), Some(own) if own == r || own == NATIONWIDE)
    });

    category_ok && region_ok
}

/// Keep the sellers matching the filters, preserving order.
pub fn filter_sellers(
    sellers: Vec<Profile>,
    category: Option<&str>,
    region: Option<&str>,
) -> Vec<Profile> {
    sellers
        .into_iter()
        .filter(|s| matches(s, category, region))
        .collect()
}

/// Stable sort putting premium sellers first.
pub fn sort_premium_first(sellers: &mut [Profile]) {
    sellers.sort_by_key(|s| !s.is_premium);
}

/// Home page selection: listed sellers, premium first, capped.
pub fn featured(sellers: Vec<Profile>) -> Vec<Profile> {
    let mut listed = filter_sellers(sellers, None, None);
    sort_premium_first(&mut listed);
    listed.truncate(FEATURED_COUNT);
    listed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;
    use chrono::Utc;

    fn seller(id: &str, region: &str, categories: &[&str], premium: bool) -> Profile {
        let mut p = Profile::new(
            id,
            format!("{id}@example.com"),
            "담당자",
            format!("{id} 주식회사"),
            UserType::Seller,
            Utc::now(),
        );
        p.region = Some(region.to_string());
        p.categories = categories.iter().map(|c| c.to_string()).collect();
        p.is_premium = premium;
        p.profile_complete = true;
        p
    }

    fn ids(sellers: &[Profile]) -> Vec<&str> {
        sellers.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn nationwide_sellers_match_any_region() {
        let sellers = vec![
            seller("seoul", "서울", &["센서"], false),
            seller("busan", "부산", &["센서"], false),
            seller("all", "전국", &["센서"], false),
        ];

        let result = filter_sellers(sellers, Some("센서"), Some("부산"));
        assert_eq!(ids(&result), vec!["busan", "all"]);
    }

    #[test]
    fn category_filter_uses_tags() {
        let sellers = vec![
            seller("a", "서울", &["PLC", "인버터"], false),
            seller("b", "서울", &["베어링"], false),
        ];

        let result = filter_sellers(sellers, Some("인버터"), None);
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn incomplete_profiles_are_hidden() {
        let mut hidden = seller("hidden", "서울", &["센서"], true);
        hidden.profile_complete = false;
        let sellers = vec![hidden, seller("shown", "서울", &["센서"], false)];

        assert_eq!(ids(&filter_sellers(sellers, None, None)), vec!["shown"]);
    }

    #[test]
    fn premium_first_is_stable() {
        let mut sellers = vec![
            seller("n1", "서울", &[], false),
            seller("p1", "서울", &[], true),
            seller("n2", "서울", &[], false),
            seller("p2", "서울", &[], true),
        ];

        sort_premium_first(&mut sellers);
        assert_eq!(ids(&sellers), vec!["p1", "p2", "n1", "n2"]);
    }

    #[test]
    fn featured_is_capped() {
        let sellers: Vec<Profile> = (0..10)
            .map(|i| seller(&format!("s{i}"), "경기", &["센서"], i == 9))
            .collect();

        let result = featured(sellers);
        assert_eq!(result.len(), FEATURED_COUNT);
        assert_eq!(result[0].id, "s9");
        assert_eq!(result[1].id, "s0");
    }
}
