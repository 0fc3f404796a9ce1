// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::Json;
use catchfac::config::Config;
use catchfac::db::FirestoreDb;
use catchfac::models::{Profile, UserType};
use catchfac::routes::create_router;
use catchfac::services::{IdTokenVerifier, IdentityClient};
use catchfac::AppState;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Secret the test verifier accepts for HS256 ID tokens.
#[allow(dead_code)]
pub const TEST_SECRET: &[u8] = b"catchfac-test-secret";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Check if both the Firestore and Auth emulators are configured.
#[allow(dead_code)]
pub fn auth_emulator_available() -> bool {
    emulator_available() && std::env::var("FIREBASE_AUTH_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
    (auth) => {
        if !crate::common::auth_emulator_available() {
            eprintln!("⚠️  Skipping: Firestore and Auth emulators not both set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(test_db_offline())
}

/// Create a test app backed by `db`, with the offline identity client.
#[allow(dead_code)]
pub fn create_test_app_with_db(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let id_tokens = IdTokenVerifier::new_with_static_secret(&config, TEST_SECRET)
        .expect("Failed to build token verifier");

    let state = Arc::new(AppState {
        config,
        db,
        id_tokens,
        identity: IdentityClient::new_mock(),
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Mint an ID token for `uid` that the test verifier accepts.
#[allow(dead_code)]
pub fn id_token(uid: &str) -> String {
    let now = now_secs();
    sign(json!({
        "iss": "https://securetoken.google.com/test-project",
        "aud": "test-project",
        "sub": uid,
        "iat": now,
        "exp": now + 3600,
        "auth_time": now,
        "email": format!("{uid}@example.com"),
        "email_verified": true,
        "firebase": { "sign_in_provider": "password" }
    }))
}

/// Sign arbitrary claims with the test secret.
#[allow(dead_code)]
pub fn sign(claims: serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Unique id for test isolation.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

/// A completed seller profile.
#[allow(dead_code)]
pub fn seller(id: &str, categories: &[&str], region: &str) -> Profile {
    let mut profile = Profile::new(
        id,
        format!("{id}@example.com"),
        "판매 담당",
        format!("{id} 상사"),
        UserType::Seller,
        chrono::Utc::now(),
    );
    profile.categories = categories.iter().map(|c| c.to_string()).collect();
    profile.region = Some(region.to_string());
    profile.profile_complete = true;
    profile
}

/// A buyer profile.
#[allow(dead_code)]
pub fn buyer(id: &str) -> Profile {
    Profile::new(
        id,
        format!("{id}@example.com"),
        "구매 담당",
        format!("{id} 제작소"),
        UserType::Buyer,
        chrono::Utc::now(),
    )
}

/// Serve an Identity Toolkit stand-in that rejects every call with
/// `provider_code`. Returns its base URL.
#[allow(dead_code)]
pub async fn spawn_rejecting_identity(provider_code: &'static str) -> String {
    let app = axum::Router::new().fallback(move || async move {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": provider_code } })),
        )
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
