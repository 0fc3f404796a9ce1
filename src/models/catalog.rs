// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed catalog values shared by forms, listings and statistics.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Part categories, in display order.
///
/// Price statistics are reported in this order as well.
pub const CATEGORIES: [&str; 9] = [
    "서보모터",
    "실린더",
    "AC/DC 모터",
    "베어링",
    "LM 가이드",
    "센서",
    "PLC",
    "인버터",
    "기타",
];

/// Known part makers. `OTHER_MAKER` requires a free-text maker.
pub const MAKERS: [&str; 11] = [
    "미쓰비시",
    "파나소닉",
    "야스카와",
    "오므론",
    "키엔스",
    "SMC",
    "THK",
    "NSK",
    "시멘스",
    "LS산전",
    OTHER_MAKER,
];

pub const OTHER_MAKER: &str = "기타";

/// Seller regions. `NATIONWIDE` matches every region filter.
pub const REGIONS: [&str; 18] = [
    "서울", "경기", "인천", "부산", "대구", "광주", "대전", "울산", "세종", "강원", "충북", "충남",
    "전북", "전남", "경북", "경남", "제주", NATIONWIDE,
];

pub const NATIONWIDE: &str = "전국";

/// Company name stored on anonymous quote requests.
pub const ANONYMOUS_COMPANY: &str = "익명";

/// Upper bound on category tags per seller profile.
pub const MAX_SELLER_CATEGORIES: usize = 5;

pub fn is_category(value: &str) -> bool {
    CATEGORIES.contains(&value)
}

pub fn is_region(value: &str) -> bool {
    REGIONS.contains(&value)
}

/// Catalog payload for form dropdowns.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub makers: Vec<String>,
    pub regions: Vec<String>,
}

impl Catalog {
    pub fn current() -> Self {
        Self {
            categories: CATEGORIES.iter().map(|s| s.to_string()).collect(),
            makers: MAKERS.iter().map(|s| s.to_string()).collect(),
            regions: REGIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nationwide_is_a_region() {
        assert!(is_region(NATIONWIDE));
        assert!(is_region("서울"));
        assert!(!is_region("Seoul"));
    }

    #[test]
    fn other_maker_is_listed_last() {
        assert_eq!(MAKERS.last(), Some(&OTHER_MAKER));
    }
}
