//! Counter endpoint response envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ErrorCode;

/// Response envelope shared by both counter endpoints.
///
/// Success and failure both travel as HTTP 200; the outcome is carried by
/// the `success` flag. Exactly one of `count` / `error` is present:
///
/// ```json
/// { "success": true, "count": 3 }
/// { "success": false, "error": "COUNTER_NOT_FOUND" }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CounterResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Counter value; present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    /// Error code; present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

impl CounterResponse {
    /// Builds the success envelope around a counter value.
    #[must_use]
    pub const fn success(count: i32) -> Self {
        Self {
            success: true,
            count: Some(count),
            error: None,
        }
    }

    /// Builds the failure envelope around an error code.
    #[must_use]
    pub const fn failure(error: ErrorCode) -> Self {
        Self {
            success: false,
            count: None,
            error: Some(error),
        }
    }
}
