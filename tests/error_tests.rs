// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use catchfac::error::AppError;
use catchfac::services::{IdTokenError, IdentityError};

async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_recent_login_maps_to_reauthentication() {
    let err: AppError = IdentityError::RequiresRecentLogin.into();
    let (status, body) = body_of(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "reauthentication_required");
    assert_eq!(
        body["details"],
        "보안을 위해 다시 로그인한 후 탈퇴해주세요."
    );
}

#[tokio::test]
async fn test_provider_codes_get_localized_messages() {
    let err: AppError = IdentityError::from_provider_code("EMAIL_EXISTS").into();
    let (status, body) = body_of(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("이메일"));
}

#[tokio::test]
async fn test_database_errors_hide_details() {
    let (status, body) = body_of(AppError::Database("connection reset".to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_token_errors_split_rejected_and_transient() {
    let rejected: AppError = IdTokenError::Rejected("bad signature".to_string()).into();
    assert!(matches!(rejected, AppError::InvalidToken));

    let transient: AppError = IdTokenError::Transient("jwks timeout".to_string()).into();
    assert!(matches!(transient, AppError::Internal(_)));
}
