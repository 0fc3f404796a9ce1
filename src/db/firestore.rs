// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (`users`, keyed by identity uid)
//! - Quote requests (`quoteRequests`)
//! - Quote responses (`quoteResponses`)
//! - The two multi-document transactions: response selection and
//!   account data deletion

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Profile, QuoteRequest, QuoteResponse, RequestStatus, UserType};
use chrono::{DateTime, Utc};
use firestore::{
    paths_camel_case, FirestoreQueryCursor, FirestoreQueryDirection, FirestoreTimestamp,
    FirestoreValue,
};
use gcloud_sdk::google::firestore::v1::{value::ValueType, Value};
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::collections::HashMap;

const MAX_CONCURRENT_DB_OPS: usize = 50;
/// Firestore limits a single commit to 500 writes.
pub const MAX_TRANSACTION_WRITES: usize = 500;

/// Filters for the request board.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    /// Only requests owned by this buyer
    pub buyer_id: Option<String>,
    pub status: Option<RequestStatus>,
    pub category: Option<String>,
    /// Resume after this request (cursor)
    pub after: Option<RequestCursor>,
}

/// Position of the last request on a board page.
///
/// Requests sort by `createdAt` descending, then by document id
/// descending, so the pair is unique even when timestamps collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCursor {
    pub created_at: DateTime<Utc>,
    pub id: String,
}

/// Counts reported by account data deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedAccountData {
    pub requests_deleted: usize,
    pub responses_deleted: usize,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by identity uid.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a profile.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Write only the named fields of `profile`, leaving the rest of the
    /// stored document untouched.
    async fn update_profile_fields(
        &self,
        profile: &Profile,
        fields: Vec<String>,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(fields)
            .in_col(collections::USERS)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Persist the premium flag alone.
    pub async fn set_premium(&self, profile: &Profile) -> Result<(), AppError> {
        self.update_profile_fields(profile, paths_camel_case!(Profile::{is_premium}))
            .await
    }

    /// Persist the admin flag alone.
    pub async fn set_admin(&self, profile: &Profile) -> Result<(), AppError> {
        self.update_profile_fields(profile, paths_camel_case!(Profile::{is_admin}))
            .await
    }

    /// Persist the seller-editable listing fields.
    pub async fn update_seller_listing(&self, profile: &Profile) -> Result<(), AppError> {
        self.update_profile_fields(
            profile,
            paths_camel_case!(Profile::{
                phone,
                description,
                categories,
                region,
                profile_complete
            }),
        )
        .await
    }

    /// Upsert many profiles with bounded concurrency.
    pub async fn upsert_profiles(&self, profiles: &[Profile]) -> Result<usize, AppError> {
        let client = self.get_client()?;

        stream::iter(profiles)
            .map(|profile| async move {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(&profile.id)
                    .object(profile)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(profiles.len())
    }

    /// All profiles (admin dashboard).
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Sellers with a completed profile, in storage order.
    pub async fn list_listed_sellers(&self) -> Result<Vec<Profile>, AppError> {
        let sellers: Vec<Profile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| {
                q.for_all([
                    q.field("userType").eq(UserType::Seller.as_str()),
                    q.field("profileComplete").eq(true),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(sellers.into_iter().filter(Profile::is_listed).collect())
    }

    /// Profiles registered with `email`.
    pub async fn find_profiles_by_email(&self, email: &str) -> Result<Vec<Profile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field("email").eq(email)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Quote Request Operations ────────────────────────────────

    pub async fn get_request(&self, id: &str) -> Result<Option<QuoteRequest>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::QUOTE_REQUESTS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a request under its own id.
    pub async fn set_request(&self, request: &QuoteRequest) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::QUOTE_REQUESTS)
            .document_id(&request.id)
            .object(request)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Request board query, newest first.
    pub async fn list_requests(
        &self,
        filter: &RequestFilter,
        limit: u32,
    ) -> Result<Vec<QuoteRequest>, AppError> {
        let client = self.get_client()?;
        let conditions = filter.clone();

        let query = client
            .fluent()
            .select()
            .from(collections::QUOTE_REQUESTS)
            .filter(move |q| {
                q.for_all([
                    conditions
                        .buyer_id
                        .as_ref()
                        .and_then(|id| q.field("buyerId").eq(id.as_str())),
                    conditions
                        .status
                        .and_then(|status| q.field("status").eq(status.as_str())),
                    conditions
                        .category
                        .as_ref()
                        .and_then(|c| q.field("category").eq(c.as_str())),
                ])
            })
            .order_by([
                ("createdAt", FirestoreQueryDirection::Descending),
                ("__name__", FirestoreQueryDirection::Descending),
            ]);

        let query = match &filter.after {
            Some(cursor) => {
                let document = format!(
                    "{}/{}/{}",
                    client.get_documents_path(),
                    collections::QUOTE_REQUESTS,
                    cursor.id
                );
                query.start_at(FirestoreQueryCursor::AfterValue(vec![
                    FirestoreTimestamp(cursor.created_at).into(),
                    FirestoreValue::from(Value {
                        value_type: Some(ValueType::ReferenceValue(document)),
                    }),
                ]))
            }
            None => query,
        };

        query
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every request owned by `buyer_id`.
    pub async fn list_requests_for_buyer(
        &self,
        buyer_id: &str,
    ) -> Result<Vec<QuoteRequest>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::QUOTE_REQUESTS)
            .filter(|q| q.for_all([q.field("buyerId").eq(buyer_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All requests (admin dashboard).
    pub async fn list_all_requests(&self) -> Result<Vec<QuoteRequest>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::QUOTE_REQUESTS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Categories of the given requests, fetched concurrently.
    ///
    /// Requests that no longer exist are absent from the map.
    pub async fn get_request_categories(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, String>, AppError> {
        let results = stream::iter(ids.iter().cloned())
            .map(|id: String| async move {
                let request = self.get_request(&id).await?;
                Ok::<_, AppError>(request.map(|r| (id, r.category)))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<(String, String)>, AppError>>>()
            .await;

        let mut categories = HashMap::with_capacity(results.len());
        for result in results {
            if let Some((id, category)) = result? {
                categories.insert(id, category);
            }
        }
        Ok(categories)
    }

    // ─── Quote Response Operations ───────────────────────────────

    pub async fn get_response(&self, id: &str) -> Result<Option<QuoteResponse>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::QUOTE_RESPONSES)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn set_response(&self, response: &QuoteResponse) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::QUOTE_RESPONSES)
            .document_id(&response.id)
            .object(response)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Responses to a request, oldest first. Optionally only one seller's.
    pub async fn list_responses_for_request(
        &self,
        request_id: &str,
        seller_id: Option<&str>,
    ) -> Result<Vec<QuoteResponse>, AppError> {
        let mut responses: Vec<QuoteResponse> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::QUOTE_RESPONSES)
            .filter(|q| {
                q.for_all([
                    q.field("requestId").eq(request_id),
                    seller_id.and_then(|s| q.field("sellerId").eq(s)),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        responses.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(responses)
    }

    /// Every response written by `seller_id`.
    pub async fn list_responses_for_seller(
        &self,
        seller_id: &str,
    ) -> Result<Vec<QuoteResponse>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::QUOTE_RESPONSES)
            .filter(|q| q.for_all([q.field("sellerId").eq(seller_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Responses created at or after `since`.
    pub async fn list_responses_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<QuoteResponse>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::QUOTE_RESPONSES)
            .filter(|q| {
                q.for_all([q
                    .field("createdAt")
                    .greater_than_or_equal(FirestoreTimestamp(since))])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Transactions ────────────────────────────────────────────

    /// Mark `response` selected and close its request in one commit.
    pub async fn select_response_atomic(
        &self,
        response: &QuoteResponse,
        request: &QuoteRequest,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut selected = response.clone();
        selected.is_selected = true;
        let mut closed = request.clone();
        closed.status = RequestStatus::Closed;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::QUOTE_RESPONSES)
            .document_id(&selected.id)
            .object(&selected)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add response to transaction: {}", e))
            })?;

        client
            .fluent()
            .update()
            .in_col(collections::QUOTE_REQUESTS)
            .document_id(&closed.id)
            .object(&closed)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add request to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            request_id = %closed.id,
            response_id = %selected.id,
            "Response selected and request closed"
        );
        Ok(())
    }

    /// Delete a profile and every request and response it owns in one
    /// commit.
    ///
    /// Fails before writing anything when the deletion would exceed the
    /// per-commit write limit.
    pub async fn delete_account_data_atomic(
        &self,
        uid: &str,
    ) -> Result<DeletedAccountData, AppError> {
        let client = self.get_client()?;

        let request_ids: Vec<String> = self
            .list_requests_for_buyer(uid)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        let response_ids: Vec<String> = self
            .list_responses_for_seller(uid)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        let total_writes = 1 + request_ids.len() + response_ids.len();
        if total_writes > MAX_TRANSACTION_WRITES {
            return Err(AppError::Conflict(format!(
                "Account owns too many documents to delete at once ({total_writes})"
            )));
        }

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let deletions = std::iter::once((collections::USERS, uid))
            .chain(
                request_ids
                    .iter()
                    .map(|id| (collections::QUOTE_REQUESTS, id.as_str())),
            )
            .chain(
                response_ids
                    .iter()
                    .map(|id| (collections::QUOTE_RESPONSES, id.as_str())),
            );

        for (collection, doc_id) in deletions {
            client
                .fluent()
                .delete()
                .from(collection)
                .document_id(doc_id)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add deletion to transaction for {}: {}",
                        collection, e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit account deletion: {}", e)))?;

        let deleted = DeletedAccountData {
            requests_deleted: request_ids.len(),
            responses_deleted: response_ids.len(),
        };

        tracing::info!(
            uid,
            requests = deleted.requests_deleted,
            responses = deleted.responses_deleted,
            "Account data deleted"
        );

        Ok(deleted)
    }
}
