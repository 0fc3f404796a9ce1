//! Database layer (Firestore).

pub mod firestore;

pub use firestore::{
    DeletedAccountData, FirestoreDb, RequestCursor, RequestFilter, MAX_TRANSACTION_WRITES,
};

/// Collection names as constants.
///
/// Names and camelCase field layout are shared with the web client.
pub mod collections {
    /// Profiles, keyed by identity uid
    pub const USERS: &str = "users";
    pub const QUOTE_REQUESTS: &str = "quoteRequests";
    pub const QUOTE_RESPONSES: &str = "quoteResponses";
}
