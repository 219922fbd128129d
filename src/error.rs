//! Service error types and API error codes.
//!
//! [`StoreError`] is the error type returned by every storage operation.
//! Route handlers pattern-match on it and translate each variant into the
//! JSON failure envelope; nothing here panics or maps to a non-200 status.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable error code exposed at the API boundary.
///
/// Serialized as `"COUNTER_NOT_FOUND"` / `"DATABASE_ERROR"` in the failure
/// envelope. This is the only error detail a client ever sees; underlying
/// database faults stay in the server logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The singleton counter row (id = 1) is missing from storage.
    CounterNotFound,
    /// Any failure originating from the persistence layer.
    DatabaseError,
}

/// Error returned by [`CounterStore`](crate::persistence::CounterStore)
/// operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The singleton counter row was absent at query time. Defensive
    /// handling of out-of-band deletion; the initializer always creates
    /// the row.
    #[error("counter row not found")]
    CounterNotFound,

    /// Storage fault: connectivity, query execution, or driver failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns the API error code for this variant.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CounterNotFound => ErrorCode::CounterNotFound,
            Self::Database(_) => ErrorCode::DatabaseError,
        }
    }
}
