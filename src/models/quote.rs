// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quote request and quote response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::catalog::ANONYMOUS_COMPANY;
use crate::models::Profile;
use crate::time_utils::format_utc_rfc3339;

/// Lifecycle of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RequestStatus {
    Open,
    Closed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "OPEN",
            RequestStatus::Closed => "CLOSED",
        }
    }
}

/// Stored quote request (`quoteRequests` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Document ID, populated on read
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    /// Owning buyer's uid
    pub buyer_id: String,
    /// Buyer company, or the anonymous placeholder
    pub buyer_company: String,
    pub category: String,
    pub maker: String,
    pub part_number: String,
    pub quantity: u32,
    pub desired_delivery: String,
    #[serde(default)]
    pub note: String,
    pub status: RequestStatus,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Validated fields for a new quote request.
#[derive(Debug, Clone)]
pub struct NewQuoteRequest {
    pub category: String,
    pub maker: String,
    pub part_number: String,
    pub quantity: u32,
    pub desired_delivery: String,
    pub note: String,
    pub is_anonymous: bool,
}

impl QuoteRequest {
    /// Build a request owned by `buyer`.
    ///
    /// Anonymous requests never carry the buyer's real company name.
    pub fn create(
        id: impl Into<String>,
        buyer: &Profile,
        new: NewQuoteRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        let buyer_company = if new.is_anonymous {
            ANONYMOUS_COMPANY.to_string()
        } else {
            buyer.company.clone()
        };

        Self {
            id: id.into(),
            buyer_id: buyer.id.clone(),
            buyer_company,
            category: new.category,
            maker: new.maker,
            part_number: new.part_number,
            quantity: new.quantity,
            desired_delivery: new.desired_delivery,
            note: new.note,
            status: RequestStatus::Open,
            created_at,
            is_anonymous: new.is_anonymous,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RequestStatus::Open
    }
}

/// Stored seller quote (`quoteResponses` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Document ID, populated on read
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    pub request_id: String,
    /// Owning seller's uid
    pub seller_id: String,
    pub seller_company: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub delivery_days: u32,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Category copied from the request at creation time.
    /// Absent on responses written by older clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Validated fields for a new quote response.
#[derive(Debug, Clone)]
pub struct NewQuoteResponse {
    pub unit_price: f64,
    pub total_price: Option<f64>,
    pub delivery_days: u32,
    pub in_stock: bool,
    pub note: String,
}

impl QuoteResponse {
    /// Build a response from `seller` against `request`.
    pub fn create(
        id: impl Into<String>,
        request: &QuoteRequest,
        seller: &Profile,
        new: NewQuoteResponse,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_price = new
            .total_price
            .unwrap_or(new.unit_price * f64::from(request.quantity));

        Self {
            id: id.into(),
            request_id: request.id.clone(),
            seller_id: seller.id.clone(),
            seller_company: seller.company.clone(),
            unit_price: new.unit_price,
            total_price,
            delivery_days: new.delivery_days,
            in_stock: new.in_stock,
            note: new.note,
            is_selected: false,
            created_at,
            category: Some(request.category.clone()),
        }
    }
}

// ─── API views ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct QuoteRequestSummary {
    pub id: String,
    pub buyer_company: String,
    pub category: String,
    pub maker: String,
    pub part_number: String,
    pub quantity: u32,
    pub desired_delivery: String,
    pub note: String,
    pub status: RequestStatus,
    pub created_at: String,
    pub is_anonymous: bool,
}

impl From<QuoteRequest> for QuoteRequestSummary {
    fn from(r: QuoteRequest) -> Self {
        // Stored data is authoritative, but never leak a company name on
        // anonymous requests written by older clients.
        let buyer_company = if r.is_anonymous {
            ANONYMOUS_COMPANY.to_string()
        } else {
            r.buyer_company
        };

        Self {
            id: r.id,
            buyer_company,
            category: r.category,
            maker: r.maker,
            part_number: r.part_number,
            quantity: r.quantity,
            desired_delivery: r.desired_delivery,
            note: r.note,
            status: r.status,
            created_at: format_utc_rfc3339(r.created_at),
            is_anonymous: r.is_anonymous,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct QuoteResponseSummary {
    pub id: String,
    pub request_id: String,
    pub seller_id: String,
    pub seller_company: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub delivery_days: u32,
    pub in_stock: bool,
    pub note: String,
    pub is_selected: bool,
    pub created_at: String,
}

impl From<QuoteResponse> for QuoteResponseSummary {
    fn from(r: QuoteResponse) -> Self {
        Self {
            id: r.id,
            request_id: r.request_id,
            seller_id: r.seller_id,
            seller_company: r.seller_company,
            unit_price: r.unit_price,
            total_price: r.total_price,
            delivery_days: r.delivery_days,
            in_stock: r.in_stock,
            note: r.note,
            is_selected: r.is_selected,
            created_at: format_utc_rfc3339(r.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;

    fn buyer() -> Profile {
        Profile::new(
            "buyer-1",
            "buyer@example.com",
            "홍길동",
            "(주)한빛정밀",
            UserType::Buyer,
            Utc::now(),
        )
    }

    fn new_request(is_anonymous: bool) -> NewQuoteRequest {
        NewQuoteRequest {
            category: "서보모터".to_string(),
            maker: "미쓰비시".to_string(),
            part_number: "HG-KR43B".to_string(),
            quantity: 4,
            desired_delivery: "2주 이내".to_string(),
            note: String::new(),
            is_anonymous,
        }
    }

    #[test]
    fn anonymous_request_stores_placeholder_company() {
        let request = QuoteRequest::create("r1", &buyer(), new_request(true), Utc::now());

        assert_eq!(request.buyer_company, ANONYMOUS_COMPANY);
        assert!(request.is_anonymous);
        assert_eq!(request.buyer_id, "buyer-1");
    }

    #[test]
    fn named_request_stores_real_company() {
        let request = QuoteRequest::create("r1", &buyer(), new_request(false), Utc::now());

        assert_eq!(request.buyer_company, "(주)한빛정밀");
        assert_eq!(request.status, RequestStatus::Open);
    }

    #[test]
    fn summary_masks_company_on_anonymous_legacy_documents() {
        let mut request = QuoteRequest::create("r1", &buyer(), new_request(true), Utc::now());
        request.buyer_company = "(주)한빛정밀".to_string();

        let summary = QuoteRequestSummary::from(request);
        assert_eq!(summary.buyer_company, ANONYMOUS_COMPANY);
    }

    #[test]
    fn response_defaults_total_and_copies_category() {
        let request = QuoteRequest::create("r1", &buyer(), new_request(false), Utc::now());
        let seller = Profile::new(
            "seller-1",
            "seller@example.com",
            "김철수",
            "서울부품공급(주)",
            UserType::Seller,
            Utc::now(),
        );

        let response = QuoteResponse::create(
            "q1",
            &request,
            &seller,
            NewQuoteResponse {
                unit_price: 125_000.0,
                total_price: None,
                delivery_days: 3,
                in_stock: true,
                note: String::new(),
            },
            Utc::now(),
        );

        assert_eq!(response.total_price, 500_000.0);
        assert_eq!(response.category.as_deref(), Some("서보모터"));
        assert_eq!(response.seller_company, "서울부품공급(주)");
        assert!(!response.is_selected);
    }
}
