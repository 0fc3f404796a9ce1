// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::identity::IdentityError;
use crate::services::id_token::IdTokenError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message shown when a sensitive operation needs a fresh sign-in.
pub const REAUTHENTICATE_MESSAGE: &str = "보안을 위해 다시 로그인한 후 탈퇴해주세요.";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Recent sign-in required")]
    ReauthenticationRequired,

    #[error("Identity provider error: {0}")]
    Identity(IdentityError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::RequiresRecentLogin => AppError::ReauthenticationRequired,
            other => AppError::Identity(other),
        }
    }
}

impl From<IdTokenError> for AppError {
    fn from(err: IdTokenError) -> Self {
        match err {
            IdTokenError::Rejected(reason) => {
                tracing::debug!(reason = %reason, "ID token rejected");
                AppError::InvalidToken
            }
            IdTokenError::Transient(reason) => {
                AppError::Internal(anyhow::anyhow!("ID token verification unavailable: {reason}"))
            }
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", Some(msg.clone())),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::ReauthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                "reauthentication_required",
                Some(REAUTHENTICATE_MESSAGE.to_string()),
            ),
            AppError::Identity(err) => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::error!(error = %err, "Identity provider error");
                }
                (status, err.code(), Some(err.user_message()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_credential_maps_to_reauthentication() {
        let err: AppError = IdentityError::RequiresRecentLogin.into();
        assert!(matches!(err, AppError::ReauthenticationRequired));

        let err: AppError = IdentityError::EmailInUse.into();
        assert!(matches!(err, AppError::Identity(IdentityError::EmailInUse)));
    }

    #[test]
    fn rejected_token_maps_to_invalid_token() {
        let err: AppError = IdTokenError::Rejected("expired".to_string()).into();
        assert!(matches!(err, AppError::InvalidToken));

        let err: AppError = IdTokenError::Transient("jwks down".to_string()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::ReauthenticationRequired, StatusCode::UNAUTHORIZED),
            (
                AppError::Identity(IdentityError::WrongPassword),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
