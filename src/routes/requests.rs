// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quote request board and quote responses.
//!
//! Access rules:
//! - buyers create requests and see only their own
//! - sellers see every request and answer open ones
//! - only the owning buyer closes a request or selects a response

use crate::db::{RequestCursor, RequestFilter};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::catalog;
use crate::models::forms::{QuoteRequestForm, QuoteResponseForm};
use crate::models::{
    Profile, QuoteRequest, QuoteRequestSummary, QuoteResponse, QuoteResponseSummary,
    RequestStatus,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/requests", get(list_requests).post(create_request))
        .route("/api/requests/{id}", get(get_request))
        .route("/api/requests/{id}/close", post(close_request))
        .route(
            "/api/requests/{id}/responses",
            get(list_responses).post(create_response),
        )
        .route("/api/responses/{id}/select", post(select_response))
}

/// The caller's profile. Signed-in accounts without one cannot trade.
async fn caller_profile(state: &AppState, user: &AuthUser) -> Result<Profile> {
    state
        .db
        .get_profile(&user.uid)
        .await?
        .ok_or_else(|| AppError::Forbidden("프로필을 먼저 등록해주세요".to_string()))
}

async fn load_request(state: &AppState, id: &str) -> Result<QuoteRequest> {
    state
        .db
        .get_request(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quote request {} not found", id)))
}

fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

// ─── Request Board ───────────────────────────────────────────

#[derive(Deserialize)]
struct RequestsQuery {
    status: Option<String>,
    category: Option<String>,
    /// Cursor for forward pagination (opaque token).
    cursor: Option<String>,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_per_page() -> u32 {
    20
}

const MAX_PER_PAGE: u32 = 100;
const CURSOR_PARTS: usize = 3;

fn parse_status(status: Option<&str>) -> Result<Option<RequestStatus>> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some("OPEN") => Ok(Some(RequestStatus::Open)),
        Some("CLOSED") => Ok(Some(RequestStatus::Closed)),
        Some(other) => Err(AppError::BadRequest(format!(
            "Invalid 'status' parameter: {other}"
        ))),
    }
}

fn parse_category(category: Option<&str>) -> Result<Option<String>> {
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(None),
        Some(c) if catalog::is_category(c) => Ok(Some(c.to_string())),
        Some(c) => Err(AppError::BadRequest(format!(
            "Invalid 'category' parameter: {c}"
        ))),
    }
}

/// Decode a cursor into the position of the last request seen.
fn parse_cursor(cursor: Option<&str>) -> Result<Option<RequestCursor>> {
    cursor
        .map(|raw| {
            let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let decoded_str = std::str::from_utf8(&decoded).map_err(|_| invalid_cursor())?;

            let parts: Vec<&str> = decoded_str.splitn(CURSOR_PARTS, ':').collect();
            if parts.len() != CURSOR_PARTS || parts[2].is_empty() || parts[2].contains('/') {
                return Err(invalid_cursor());
            }

            let seconds = parts[0].parse::<i64>().map_err(|_| invalid_cursor())?;
            let nanos = parts[1].parse::<u32>().map_err(|_| invalid_cursor())?;
            let created_at = DateTime::from_timestamp(seconds, nanos).ok_or_else(invalid_cursor)?;

            Ok(RequestCursor {
                created_at,
                id: parts[2].to_string(),
            })
        })
        .transpose()
}

fn encode_cursor(cursor: &RequestCursor) -> String {
    let payload = format!(
        "{}:{}:{}",
        cursor.created_at.timestamp(),
        cursor.created_at.timestamp_subsec_nanos(),
        cursor.id
    );
    URL_SAFE_NO_PAD.encode(payload)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RequestsResponse {
    pub requests: Vec<QuoteRequestSummary>,
    pub per_page: u32,
    pub next_cursor: Option<String>,
}

/// Request board, newest first.
async fn list_requests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RequestsQuery>,
) -> Result<Json<RequestsResponse>> {
    let limit = params.per_page.clamp(1, MAX_PER_PAGE);
    let status = parse_status(params.status.as_deref())?;
    let category = parse_category(params.category.as_deref())?;
    let after = parse_cursor(params.cursor.as_deref())?;

    let profile = caller_profile(&state, &user).await?;
    let filter = RequestFilter {
        buyer_id: (!profile.is_seller()).then(|| profile.id.clone()),
        status,
        category,
        after,
    };

    tracing::debug!(
        uid = %user.uid,
        seller = profile.is_seller(),
        status = ?filter.status,
        category = ?filter.category,
        cursor = ?params.cursor,
        "Fetching quote requests"
    );

    // Fetch one extra item to determine if another page is available.
    let mut results = state
        .db
        .list_requests(&filter, limit.saturating_add(1))
        .await?;

    let has_more = results.len() > limit as usize;
    if has_more {
        results.truncate(limit as usize);
    }

    let next_cursor = if has_more {
        results.last().map(|r| {
            encode_cursor(&RequestCursor {
                created_at: r.created_at,
                id: r.id.clone(),
            })
        })
    } else {
        None
    };

    Ok(Json(RequestsResponse {
        requests: results.into_iter().map(QuoteRequestSummary::from).collect(),
        per_page: limit,
        next_cursor,
    }))
}

/// Post a new quote request. Buyers only.
async fn create_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<QuoteRequestForm>,
) -> Result<(StatusCode, Json<QuoteRequestSummary>)> {
    let new_request = form.validate_form()?;

    let buyer = caller_profile(&state, &user).await?;
    if !buyer.is_buyer() {
        return Err(AppError::Forbidden(
            "구매자 회원만 견적을 요청할 수 있습니다".to_string(),
        ));
    }

    let request = QuoteRequest::create(new_document_id(), &buyer, new_request, Utc::now());
    state.db.set_request(&request).await?;

    tracing::info!(
        uid = %user.uid,
        request_id = %request.id,
        category = %request.category,
        anonymous = request.is_anonymous,
        "Quote request created"
    );

    Ok((StatusCode::CREATED, Json(QuoteRequestSummary::from(request))))
}

/// A single request, for its owner or any seller.
async fn get_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<QuoteRequestSummary>> {
    let profile = caller_profile(&state, &user).await?;
    let request = load_request(&state, &id).await?;

    if request.buyer_id != profile.id && !profile.is_seller() {
        return Err(AppError::Forbidden(
            "이 견적 요청을 볼 수 있는 권한이 없습니다".to_string(),
        ));
    }

    Ok(Json(QuoteRequestSummary::from(request)))
}

/// Close a request. Owner only; closing twice is a no-op.
async fn close_request(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<QuoteRequestSummary>> {
    let mut request = load_request(&state, &id).await?;

    if request.buyer_id != user.uid {
        return Err(AppError::Forbidden(
            "본인의 견적 요청만 마감할 수 있습니다".to_string(),
        ));
    }

    if request.is_open() {
        request.status = RequestStatus::Closed;
        state.db.set_request(&request).await?;
        tracing::info!(uid = %user.uid, request_id = %id, "Quote request closed");
    }

    Ok(Json(QuoteRequestSummary::from(request)))
}

// ─── Responses ───────────────────────────────────────────────

/// Responses to a request. The owner sees all, a seller only their own.
async fn list_responses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<QuoteResponseSummary>>> {
    let profile = caller_profile(&state, &user).await?;
    let request = load_request(&state, &id).await?;

    let seller_filter = if request.buyer_id == profile.id {
        None
    } else if profile.is_seller() {
        Some(profile.id.as_str())
    } else {
        return Err(AppError::Forbidden(
            "이 견적 요청을 볼 수 있는 권한이 없습니다".to_string(),
        ));
    };

    let responses = state
        .db
        .list_responses_for_request(&request.id, seller_filter)
        .await?;

    Ok(Json(
        responses
            .into_iter()
            .map(QuoteResponseSummary::from)
            .collect(),
    ))
}

/// Answer an open request. Sellers only.
async fn create_response(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(form): Json<QuoteResponseForm>,
) -> Result<(StatusCode, Json<QuoteResponseSummary>)> {
    let new_response = form.validate_form()?;

    let seller = caller_profile(&state, &user).await?;
    if !seller.is_seller() {
        return Err(AppError::Forbidden(
            "판매자 회원만 견적을 제출할 수 있습니다".to_string(),
        ));
    }

    let request = load_request(&state, &id).await?;
    if !request.is_open() {
        return Err(AppError::Conflict("마감된 견적 요청입니다".to_string()));
    }

    let response =
        QuoteResponse::create(new_document_id(), &request, &seller, new_response, Utc::now());
    state.db.set_response(&response).await?;

    tracing::info!(
        uid = %user.uid,
        request_id = %request.id,
        response_id = %response.id,
        "Quote response submitted"
    );

    Ok((StatusCode::CREATED, Json(QuoteResponseSummary::from(response))))
}

/// Pick a response. Closes the request in the same commit.
async fn select_response(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<QuoteResponseSummary>> {
    let response = state
        .db
        .get_response(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quote response {} not found", id)))?;
    let request = load_request(&state, &response.request_id).await?;

    if request.buyer_id != user.uid {
        return Err(AppError::Forbidden(
            "본인의 견적 요청에 대해서만 선택할 수 있습니다".to_string(),
        ));
    }
    if !request.is_open() {
        return Err(AppError::Conflict("마감된 견적 요청입니다".to_string()));
    }

    state.db.select_response_atomic(&response, &request).await?;

    let mut selected = response;
    selected.is_selected = true;
    Ok(Json(QuoteResponseSummary::from(selected)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_round_trip() {
        let cursor = RequestCursor {
            created_at: DateTime::from_timestamp(1_767_225_600, 123_456).unwrap(),
            id: "9f0c2a7e41b84d6c".to_string(),
        };

        let encoded = encode_cursor(&cursor);
        let decoded = parse_cursor(Some(&encoded)).unwrap().unwrap();

        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_cursor_keeps_id_of_same_instant() {
        let created_at = DateTime::from_timestamp(1_767_225_600, 0).unwrap();
        let first = RequestCursor {
            created_at,
            id: "b".to_string(),
        };
        let second = RequestCursor {
            created_at,
            id: "a".to_string(),
        };

        assert_ne!(encode_cursor(&first), encode_cursor(&second));
        assert_eq!(
            parse_cursor(Some(&encode_cursor(&second))).unwrap().unwrap().id,
            "a"
        );
    }

    #[test]
    fn test_cursor_rejects_invalid_input() {
        // "123", "a:b", "1:2" (no id) and "1:2:" (empty id)
        for raw in ["not-base64!", "MTIz", "YTpi", "MToy", "MToyOg"] {
            let err = parse_cursor(Some(raw)).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{raw}");
        }
        assert!(parse_cursor(None).unwrap().is_none());
    }

    #[test]
    fn test_status_parameter() {
        assert_eq!(parse_status(Some("OPEN")).unwrap(), Some(RequestStatus::Open));
        assert_eq!(parse_status(Some("")).unwrap(), None);
        assert!(parse_status(Some("open")).is_err());
    }

    #[test]
    fn test_category_parameter() {
        assert_eq!(parse_category(Some("PLC")).unwrap().as_deref(), Some("PLC"));
        assert_eq!(parse_category(None).unwrap(), None);
        assert!(parse_category(Some("로봇")).is_err());
    }
}
