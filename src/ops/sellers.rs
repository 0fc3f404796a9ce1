// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seeding and exporting the sample seller directory.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;

use super::sample_sellers::{sample_records, SellerRecord};
use crate::db::FirestoreDb;
use crate::models::{catalog, Profile};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub written: usize,
    pub premium: usize,
}

/// Read a seller file (document id to record map) as written by
/// [`export_sellers`].
pub fn load_seller_file(path: &Path) -> anyhow::Result<BTreeMap<String, SellerRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Convert records to profiles, rejecting values outside the catalog.
pub fn build_profiles(
    records: BTreeMap<String, SellerRecord>,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<Profile>> {
    records
        .into_iter()
        .map(|(id, record)| {
            if let Some(bad) = record.categories.iter().find(|c| !catalog::is_category(c)) {
                bail!("{id}: unknown category {bad}");
            }
            if let Some(region) = record.region.as_deref() {
                if !catalog::is_region(region) {
                    bail!("{id}: unknown region {region}");
                }
            }
            record.into_profile(id, now)
        })
        .collect()
}

/// Write seller profiles, either from `file` or the built-in samples.
///
/// With `dry_run` nothing is written; the report shows what would be.
pub async fn seed_sellers(
    db: &FirestoreDb,
    file: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<SeedReport> {
    let now = Utc::now();
    let records = match file {
        Some(path) => load_seller_file(path)?,
        None => sample_records(now),
    };
    let profiles = build_profiles(records, now)?;
    let premium = profiles.iter().filter(|p| p.is_premium).count();

    for profile in &profiles {
        tracing::info!(
            id = %profile.id,
            company = %profile.company,
            premium = profile.is_premium,
            dry_run,
            "Seeding seller"
        );
    }

    if dry_run {
        return Ok(SeedReport {
            written: 0,
            premium,
        });
    }

    let written = db.upsert_profiles(&profiles).await?;
    Ok(SeedReport { written, premium })
}

/// Write the built-in samples to `out` as pretty JSON. Returns the count.
pub fn export_sellers(out: &Path) -> anyhow::Result<usize> {
    let records = sample_records(Utc::now());
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    Ok(records.len())
}
