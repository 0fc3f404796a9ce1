// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod catalog;
pub mod dashboard;
pub mod forms;
pub mod price_stats;
pub mod profile;
pub mod quote;

pub use catalog::Catalog;
pub use dashboard::{Dashboard, DashboardStats};
pub use price_stats::PriceStat;
pub use profile::{Profile, ProfileResponse, SellerDetail, SellerSummary, UserType};
pub use quote::{
    NewQuoteRequest, NewQuoteResponse, QuoteRequest, QuoteRequestSummary, QuoteResponse,
    QuoteResponseSummary, RequestStatus,
};
