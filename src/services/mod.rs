// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity, account and marketplace services.

pub mod account;
pub mod id_token;
pub mod identity;
pub mod prices;
pub mod sellers;

pub use id_token::{IdTokenError, IdTokenVerifier, VerifiedIdentity};
pub use identity::{AuthTokens, IdentityClient, IdentityError};
