// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! catchfac API Server
//!
//! Serves the quote request board, seller directory and price statistics
//! for the catchfac industrial parts marketplace.

use catchfac::{
    config::Config,
    db::FirestoreDb,
    services::{IdTokenVerifier, IdentityClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting catchfac API");

    let db = FirestoreDb::new(&config.gcp_project_id).await?;
    let id_tokens = IdTokenVerifier::new(&config)?;
    let identity = IdentityClient::new(&config)?;

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        id_tokens,
        identity,
    });

    let app = catchfac::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catchfac=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
