// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account deletion.
//!
//! Stored data goes first, in a single Firestore commit. The identity is
//! deleted afterwards through the provider. The two steps are not atomic:
//! when the provider refuses, the documents stay deleted and the identity
//! remains without a profile.

use crate::db::{DeletedAccountData, FirestoreDb};
use crate::error::AppError;
use crate::services::identity::IdentityClient;

/// Delete everything owned by `uid`, then the identity behind `id_token`.
pub async fn delete_account(
    db: &FirestoreDb,
    identity: &IdentityClient,
    uid: &str,
    id_token: &str,
) -> Result<DeletedAccountData, AppError> {
    tracing::info!(uid, "Deleting account");

    let deleted = db.delete_account_data_atomic(uid).await?;

    if let Err(e) = identity.delete_account(id_token).await {
        tracing::warn!(
            uid,
            error = %e,
            "Account data deleted but identity deletion failed; identity remains without profile"
        );
        return Err(e.into());
    }

    tracing::info!(
        uid,
        requests = deleted.requests_deleted,
        responses = deleted.responses_deleted,
        "Account deleted"
    );
    Ok(deleted)
}
