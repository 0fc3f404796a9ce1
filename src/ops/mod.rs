// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Operator tasks driven by the `catchfac-admin` binary.

pub mod admin;
pub mod assets;
pub mod sample_sellers;
pub mod sellers;

pub use admin::set_admin;
pub use assets::{check_assets, AssetReport};
pub use sellers::{export_sellers, load_seller_file, seed_sellers, SeedReport};
