// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase ID token verification.
//!
//! Tokens are RS256 JWTs signed by the `securetoken` service account. The
//! public keys are published as a JWKS document and cached for the
//! `Cache-Control: max-age` the endpoint advertises.

use crate::config::Config;
use anyhow::Context;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, RwLock};

const JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const CLOCK_SKEW_SECS: u64 = 60;

/// Identity extracted from a valid ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub auth_time: Option<u64>,
    pub sign_in_provider: Option<String>,
}

/// Verification error categories.
#[derive(Debug, Clone)]
pub enum IdTokenError {
    /// The token is malformed, expired, or not issued for this project.
    Rejected(String),
    /// Keys could not be fetched; the token may well be valid.
    Transient(String),
}

#[derive(Clone)]
enum VerifierMode {
    Google,
    /// HS256 with a shared secret, for deterministic tests.
    StaticSecret(Arc<DecodingKey>),
    /// The Auth emulator issues unsigned tokens.
    Emulator,
}

#[derive(Clone)]
struct JwksCacheEntry {
    keys_by_kid: HashMap<String, Arc<DecodingKey>>,
    expires_at: Instant,
}

/// Verifier for Firebase-issued ID tokens.
pub struct IdTokenVerifier {
    http_client: reqwest::Client,
    project_id: String,
    mode: VerifierMode,
    jwks_cache: RwLock<Option<JwksCacheEntry>>,
    refresh_lock: Mutex<()>,
}

impl IdTokenVerifier {
    /// Create a verifier for the configured project.
    ///
    /// Trusts unsigned tokens only when the Auth emulator is configured.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mode = if Config::auth_emulator_host().is_some() {
            tracing::warn!("FIREBASE_AUTH_EMULATOR_HOST set; accepting unsigned ID tokens");
            VerifierMode::Emulator
        } else {
            VerifierMode::Google
        };

        let verifier = Self::with_mode(&config.gcp_project_id, mode)?;
        tracing::info!(project = %verifier.project_id, "Initialized ID token verifier");
        Ok(verifier)
    }

    /// Create a verifier that checks HS256 signatures with `secret`.
    pub fn new_with_static_secret(config: &Config, secret: &[u8]) -> anyhow::Result<Self> {
        if secret.is_empty() {
            anyhow::bail!("static ID token secret must not be empty");
        }
        Self::with_mode(
            &config.gcp_project_id,
            VerifierMode::StaticSecret(Arc::new(DecodingKey::from_secret(secret))),
        )
    }

    fn with_mode(project_id: &str, mode: VerifierMode) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building JWKS HTTP client")?;

        Ok(Self {
            http_client,
            project_id: project_id.to_string(),
            mode,
            jwks_cache: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    fn issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }

    /// Verify a raw ID token.
    pub async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdTokenError> {
        if token.is_empty() {
            return Err(IdTokenError::Rejected("token is empty".to_string()));
        }

        let claims = match &self.mode {
            VerifierMode::Emulator => {
                let claims = decode_unverified(token)?;
                self.check_claims_unsigned(&claims)?;
                claims
            }
            VerifierMode::StaticSecret(key) => {
                self.decode_signed(token, key.as_ref(), Algorithm::HS256)?
            }
            VerifierMode::Google => {
                let header = decode_header(token)
                    .map_err(|e| IdTokenError::Rejected(format!("invalid JWT header: {e}")))?;
                if header.alg != Algorithm::RS256 {
                    return Err(IdTokenError::Rejected(format!(
                        "unexpected JWT alg: {:?}",
                        header.alg
                    )));
                }
                let kid = header
                    .kid
                    .ok_or_else(|| IdTokenError::Rejected("missing JWT kid".to_string()))?;
                let key = self.decoding_key_for_kid(&kid).await?;
                self.decode_signed(token, key.as_ref(), Algorithm::RS256)?
            }
        };

        validate_iat(claims.iat)?;

        if claims.sub.trim().is_empty() {
            return Err(IdTokenError::Rejected("empty sub claim".to_string()));
        }

        Ok(VerifiedIdentity {
            uid: claims.sub,
            email: claims.email,
            email_verified: claims.email_verified.unwrap_or(false),
            auth_time: claims.auth_time,
            sign_in_provider: claims.firebase.and_then(|f| f.sign_in_provider),
        })
    }

    fn decode_signed(
        &self,
        token: &str,
        key: &DecodingKey,
        alg: Algorithm,
    ) -> Result<FirebaseClaims, IdTokenError> {
        let mut validation = Validation::new(alg);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.set_issuer(&[self.issuer()]);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.leeway = CLOCK_SKEW_SECS;

        decode::<FirebaseClaims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|e| IdTokenError::Rejected(format!("JWT validation failed: {e}")))
    }

    /// Claim checks for tokens whose signature is not verified.
    fn check_claims_unsigned(&self, claims: &FirebaseClaims) -> Result<(), IdTokenError> {
        if claims.aud != self.project_id {
            return Err(IdTokenError::Rejected(format!(
                "unexpected audience: {}",
                claims.aud
            )));
        }
        if claims.iss != self.issuer() {
            return Err(IdTokenError::Rejected(format!(
                "unexpected issuer: {}",
                claims.iss
            )));
        }
        if claims.exp + CLOCK_SKEW_SECS < now_unix_secs() {
            return Err(IdTokenError::Rejected("token expired".to_string()));
        }
        Ok(())
    }

    async fn decoding_key_for_kid(&self, kid: &str) -> Result<Arc<DecodingKey>, IdTokenError> {
        if let Some(key) = self.lookup_cached_key(kid).await {
            return Ok(key);
        }

        for force_refresh in [false, true] {
            self.refresh_jwks(force_refresh).await?;
            if let Some(key) = self.lookup_cached_key(kid).await {
                return Ok(key);
            }
        }

        Err(IdTokenError::Rejected(format!(
            "JWT kid not found in JWKS after refresh: {kid}"
        )))
    }

    async fn lookup_cached_key(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        let cache = self.jwks_cache.read().await;
        let now = Instant::now();
        cache
            .as_ref()
            .filter(|entry| entry.expires_at > now)
            .and_then(|entry| entry.keys_by_kid.get(kid))
            .cloned()
    }

    async fn refresh_jwks(&self, force_refresh: bool) -> Result<(), IdTokenError> {
        let _guard = self.refresh_lock.lock().await;

        if !force_refresh {
            let cache = self.jwks_cache.read().await;
            if cache
                .as_ref()
                .is_some_and(|entry| entry.expires_at > Instant::now())
            {
                return Ok(());
            }
        }

        tracing::debug!(jwks_uri = JWKS_URL, "Refreshing securetoken JWKS cache");

        let response = self
            .http_client
            .get(JWKS_URL)
            .send()
            .await
            .map_err(|e| IdTokenError::Transient(format!("JWKS request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(IdTokenError::Transient(format!(
                "JWKS request returned status {}",
                response.status()
            )));
        }

        let ttl = cache_ttl_from_headers(response.headers(), DEFAULT_CACHE_TTL);

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| IdTokenError::Transient(format!("invalid JWKS JSON: {e}")))?;

        let mut keys_by_kid: HashMap<String, Arc<DecodingKey>> = HashMap::new();

        for jwk in jwks.keys {
            if jwk.kty != "RSA" || jwk.kid.trim().is_empty() {
                continue;
            }
            if jwk.alg.as_deref().is_some_and(|alg| alg != "RS256") {
                continue;
            }

            match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => {
                    keys_by_kid.insert(jwk.kid, Arc::new(key));
                }
                Err(e) => {
                    tracing::warn!(error = %e, kid = %jwk.kid, "Skipping invalid RSA JWKS key");
                }
            }
        }

        if keys_by_kid.is_empty() {
            return Err(IdTokenError::Transient(
                "JWKS response did not include any usable RSA keys".to_string(),
            ));
        }

        *self.jwks_cache.write().await = Some(JwksCacheEntry {
            keys_by_kid,
            expires_at: Instant::now() + ttl,
        });

        tracing::debug!(ttl_secs = ttl.as_secs(), "securetoken JWKS cache refreshed");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    alg: Option<String>,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    iss: String,
    aud: String,
    sub: String,
    exp: u64,
    iat: Option<u64>,
    auth_time: Option<u64>,
    email: Option<String>,
    email_verified: Option<bool>,
    firebase: Option<FirebaseInfo>,
}

#[derive(Debug, Deserialize)]
struct FirebaseInfo {
    sign_in_provider: Option<String>,
}

/// Decode the payload segment of a JWT without checking the signature.
fn decode_unverified(token: &str) -> Result<FirebaseClaims, IdTokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| IdTokenError::Rejected("malformed JWT".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| IdTokenError::Rejected(format!("invalid JWT payload encoding: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| IdTokenError::Rejected(format!("invalid JWT claims: {e}")))
}

fn validate_iat(iat: Option<u64>) -> Result<(), IdTokenError> {
    let Some(iat) = iat else {
        return Err(IdTokenError::Rejected("missing iat claim".to_string()));
    };

    if iat > now_unix_secs() + CLOCK_SKEW_SECS {
        return Err(IdTokenError::Rejected(
            "iat claim is in the future".to_string(),
        ));
    }

    Ok(())
}

fn cache_ttl_from_headers(headers: &reqwest::header::HeaderMap, fallback: Duration) -> Duration {
    headers
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_cache_control_max_age)
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}

fn parse_cache_control_max_age(value: &str) -> Option<u64> {
    value.split(',').find_map(|directive| {
        directive
            .trim()
            .strip_prefix("max-age=")
            .and_then(|raw| raw.trim_matches('"').parse::<u64>().ok())
    })
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
