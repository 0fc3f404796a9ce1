// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use anyhow::bail;

use crate::db::FirestoreDb;

/// Grant the admin flag to every profile registered with `email`.
pub async fn set_admin(db: &FirestoreDb, email: &str) -> anyhow::Result<usize> {
    let email = email.trim();
    if email.is_empty() {
        bail!("email must not be empty");
    }

    let profiles = db.find_profiles_by_email(email).await?;
    if profiles.is_empty() {
        bail!("no profile registered with {email}");
    }

    let mut updated = 0;
    for mut profile in profiles {
        if profile.is_admin {
            tracing::info!(uid = %profile.id, "Already an admin");
            continue;
        }
        profile.is_admin = true;
        db.set_admin(&profile).await?;
        tracing::info!(uid = %profile.id, "Granted admin");
        updated += 1;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let db = FirestoreDb::new_mock();
        let err = set_admin(&db, "  ").await.unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
