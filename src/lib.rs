// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! catchfac: a B2B marketplace for industrial parts
//!
//! This crate provides the backend API where buyers post quote requests,
//! sellers answer them, and sellers are listed in a public directory.
//! Identity and storage are delegated to Firebase Authentication and
//! Cloud Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod ops;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{IdTokenVerifier, IdentityClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub id_tokens: IdTokenVerifier,
    pub identity: IdentityClient,
}
