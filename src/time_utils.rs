// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timestamp text used in API payloads and seller files.

use chrono::{DateTime, SecondsFormat, Utc};

/// Second-precision RFC3339 with a `Z` suffix, e.g. `2026-03-01T09:00:00Z`.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse RFC3339 text with any offset into UTC.
pub fn parse_utc_rfc3339(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}
