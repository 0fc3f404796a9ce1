// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::format_utc_rfc3339;

/// Marketplace role of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UserType {
    Buyer,
    Seller,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Buyer => "BUYER",
            UserType::Seller => "SELLER",
        }
    }
}

/// Profile stored in the `users` collection.
///
/// The document ID is the identity provider's uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Document ID (identity uid), populated on read
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    pub email: String,
    /// Contact person
    pub name: String,
    pub company: String,
    pub user_type: UserType,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,

    // ─── Seller fields ───────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(
        default,
        with = "firestore::serialize_as_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub premium_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profile_complete: bool,

    #[serde(default)]
    pub is_admin: bool,
}

impl Profile {
    /// New profile as written at sign-up or first federated login.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        company: impl Into<String>,
        user_type: UserType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            company: company.into(),
            user_type,
            created_at,
            phone: None,
            description: None,
            categories: Vec::new(),
            region: None,
            is_premium: false,
            premium_until: None,
            profile_complete: false,
            is_admin: false,
        }
    }

    pub fn is_seller(&self) -> bool {
        self.user_type == UserType::Seller
    }

    pub fn is_buyer(&self) -> bool {
        self.user_type == UserType::Buyer
    }

    /// Whether the profile may appear in public seller listings.
    pub fn is_listed(&self) -> bool {
        self.is_seller() && self.profile_complete
    }
}

/// Profile as returned to its owner.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub company: String,
    pub user_type: UserType,
    pub created_at: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub region: Option<String>,
    pub is_premium: bool,
    pub premium_until: Option<String>,
    pub profile_complete: bool,
    pub is_admin: bool,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            company: p.company,
            user_type: p.user_type,
            created_at: format_utc_rfc3339(p.created_at),
            phone: p.phone,
            description: p.description,
            categories: p.categories,
            region: p.region,
            is_premium: p.is_premium,
            premium_until: p.premium_until.map(format_utc_rfc3339),
            profile_complete: p.profile_complete,
            is_admin: p.is_admin,
        }
    }
}

/// Seller card shown in listings.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SellerSummary {
    pub id: String,
    pub company: String,
    pub name: String,
    pub region: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub is_premium: bool,
}

impl From<&Profile> for SellerSummary {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id.clone(),
            company: p.company.clone(),
            name: p.name.clone(),
            region: p.region.clone(),
            description: p.description.clone(),
            categories: p.categories.clone(),
            is_premium: p.is_premium,
        }
    }
}

/// Public seller detail page, including contact details.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SellerDetail {
    #[serde(flatten)]
    pub summary: SellerSummary,
    pub email: String,
    pub phone: Option<String>,
    pub premium_until: Option<String>,
}

impl From<Profile> for SellerDetail {
    fn from(p: Profile) -> Self {
        Self {
            summary: SellerSummary::from(&p),
            email: p.email,
            phone: p.phone,
            premium_until: p.premium_until.map(format_utc_rfc3339),
        }
    }
}
