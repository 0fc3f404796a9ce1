// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity Toolkit REST client.
//!
//! Handles:
//! - E-mail/password sign-up and sign-in
//! - Account lookup for a signed-in user
//! - Deleting the signed-in user's identity
//!
//! Provider error codes are mapped to [`IdentityError`] variants, each with
//! a localized message that is safe to show to the user.

use crate::config::Config;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PRODUCTION_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity provider failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("email already in use")]
    EmailInUse,
    #[error("invalid email")]
    InvalidEmail,
    #[error("weak password")]
    WeakPassword,
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("recent login required")]
    RequiresRecentLogin,
    #[error("session expired")]
    SessionExpired,
    #[error("user disabled")]
    UserDisabled,
    #[error("sign-in method not allowed")]
    OperationNotAllowed,
    #[error("too many attempts")]
    TooManyAttempts,
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error("identity provider request failed: {0}")]
    Transport(String),
    #[error("identity provider not configured (offline mode)")]
    Offline,
}

impl IdentityError {
    /// Map a provider error code such as `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    pub fn from_provider_code(raw: &str) -> Self {
        let code = raw.split(':').next().unwrap_or_default().trim();
        match code {
            "EMAIL_EXISTS" => IdentityError::EmailInUse,
            "INVALID_EMAIL" | "MISSING_EMAIL" => IdentityError::InvalidEmail,
            c if c.starts_with("WEAK_PASSWORD") => IdentityError::WeakPassword,
            "EMAIL_NOT_FOUND" => IdentityError::UserNotFound,
            "INVALID_PASSWORD" | "MISSING_PASSWORD" => IdentityError::WrongPassword,
            "INVALID_LOGIN_CREDENTIALS" => IdentityError::InvalidCredential,
            "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => IdentityError::RequiresRecentLogin,
            "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "USER_NOT_FOUND" => {
                IdentityError::SessionExpired
            }
            "USER_DISABLED" => IdentityError::UserDisabled,
            "OPERATION_NOT_ALLOWED" => IdentityError::OperationNotAllowed,
            c if c.starts_with("TOO_MANY_ATTEMPTS_TRY_LATER") => IdentityError::TooManyAttempts,
            _ => IdentityError::Provider(raw.to_string()),
        }
    }

    /// Machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::EmailInUse => "email_in_use",
            IdentityError::InvalidEmail => "invalid_email",
            IdentityError::WeakPassword => "weak_password",
            IdentityError::UserNotFound => "user_not_found",
            IdentityError::WrongPassword => "wrong_password",
            IdentityError::InvalidCredential => "invalid_credential",
            IdentityError::RequiresRecentLogin => "requires_recent_login",
            IdentityError::SessionExpired => "session_expired",
            IdentityError::UserDisabled => "user_disabled",
            IdentityError::OperationNotAllowed => "operation_not_allowed",
            IdentityError::TooManyAttempts => "too_many_attempts",
            IdentityError::Provider(_) => "identity_error",
            IdentityError::Transport(_) | IdentityError::Offline => "identity_unavailable",
        }
    }

    /// Localized message for the user.
    pub fn user_message(&self) -> String {
        match self {
            IdentityError::EmailInUse => "이미 사용 중인 이메일입니다",
            IdentityError::InvalidEmail => "올바른 이메일 형식이 아닙니다",
            IdentityError::WeakPassword => "비밀번호가 너무 약합니다",
            IdentityError::UserNotFound => "등록되지 않은 이메일입니다",
            IdentityError::WrongPassword => "비밀번호가 올바르지 않습니다",
            IdentityError::InvalidCredential => "이메일 또는 비밀번호가 올바르지 않습니다",
            IdentityError::RequiresRecentLogin => "보안을 위해 다시 로그인한 후 탈퇴해주세요.",
            IdentityError::SessionExpired => "로그인이 만료되었습니다. 다시 로그인해주세요",
            IdentityError::UserDisabled => "비활성화된 계정입니다",
            IdentityError::OperationNotAllowed => "허용되지 않은 로그인 방식입니다",
            IdentityError::TooManyAttempts => "잠시 후 다시 시도해주세요",
            IdentityError::Provider(raw) => return raw.clone(),
            IdentityError::Transport(_) | IdentityError::Offline => {
                "인증 서버에 연결할 수 없습니다. 잠시 후 다시 시도해주세요"
            }
        }
        .to_string()
    }

    pub fn status(&self) -> StatusCode {
        match self {
            IdentityError::EmailInUse => StatusCode::CONFLICT,
            IdentityError::RequiresRecentLogin | IdentityError::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }
            IdentityError::UserDisabled | IdentityError::OperationNotAllowed => {
                StatusCode::FORBIDDEN
            }
            IdentityError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            IdentityError::Transport(_) | IdentityError::Offline => StatusCode::BAD_GATEWAY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Tokens returned by sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    /// Identity uid
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Lifetime of `id_token` in seconds, as a decimal string
    #[serde(default)]
    pub expires_in: String,
}

/// Account record from `accounts:lookup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Identity Toolkit client authenticated by the web API key.
#[derive(Clone)]
pub struct IdentityClient {
    http: Option<reqwest::Client>,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a client for the configured project.
    ///
    /// Targets the Auth emulator when `FIREBASE_AUTH_EMULATOR_HOST` is set.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base_url = match Config::auth_emulator_host() {
            Some(host) => {
                tracing::info!(host = %host, "Using Firebase Auth emulator");
                format!("http://{host}/identitytoolkit.googleapis.com/v1")
            }
            None => PRODUCTION_BASE_URL.to_string(),
        };
        Self::with_base_url(base_url, config.firebase_api_key.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            http: Some(http),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create an offline client for tests. Every call fails with
    /// [`IdentityError::Offline`].
    pub fn new_mock() -> Self {
        Self {
            http: None,
            base_url: String::new(),
            api_key: String::new(),
        }
    }

    /// Create an e-mail/password account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        self.post(
            "accounts:signUp",
            &serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    /// Sign in with e-mail and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        self.post(
            "accounts:signInWithPassword",
            &serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    /// Look up the account that owns `id_token`.
    pub async fn lookup(&self, id_token: &str) -> Result<AccountInfo, IdentityError> {
        let response: LookupResponse = self
            .post("accounts:lookup", &serde_json::json!({ "idToken": id_token }))
            .await?;
        response
            .users
            .into_iter()
            .next()
            .ok_or(IdentityError::SessionExpired)
    }

    /// Delete the account that owns `id_token`.
    ///
    /// The provider refuses with `CREDENTIAL_TOO_OLD_LOGIN_AGAIN` when the
    /// sign-in is not recent.
    pub async fn delete_account(&self, id_token: &str) -> Result<(), IdentityError> {
        let _: serde_json::Value = self
            .post("accounts:delete", &serde_json::json!({ "idToken": id_token }))
            .await?;
        tracing::info!("Identity account deleted");
        Ok(())
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, IdentityError> {
        let http = self.http.as_ref().ok_or(IdentityError::Offline)?;
        let url = format!("{}/{}", self.base_url, method);

        let response = http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        Self::check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, IdentityError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => {
                    tracing::debug!(status = %status, code = %envelope.error.message, "Identity provider rejected request");
                    IdentityError::from_provider_code(&envelope.error.message)
                }
                Err(_) => IdentityError::Transport(format!("HTTP {}: {}", status, body)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::Transport(format!("JSON parse error: {}", e)))
    }
}
