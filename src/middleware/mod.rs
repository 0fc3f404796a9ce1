// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request guards and response decoration.

pub mod admin;
pub mod auth;
pub mod security;

pub use admin::require_admin;
pub use auth::require_auth;
