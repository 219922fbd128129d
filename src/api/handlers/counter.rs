//! Counter handlers: read and increment.
//!
//! Both handlers follow the same shape: one store call, then a pattern
//! match that folds the result into the [`CounterResponse`] envelope.
//! Database faults are logged here with full detail; the client only ever
//! sees the generic `DATABASE_ERROR` code.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::CounterResponse;
use crate::app_state::AppState;
use crate::error::StoreError;

/// `GET /api/count` — Read the current counter value.
#[utoipa::path(
    get,
    path = "/api/count",
    tag = "Counter",
    summary = "Read the counter",
    description = "Returns the current value of the shared counter. Failures are reported in-band via the `success` flag; the status is always 200.",
    responses(
        (status = 200, description = "Counter value or in-band error", body = CounterResponse),
    )
)]
pub async fn get_count(State(state): State<AppState>) -> impl IntoResponse {
    let response = match state.store.fetch().await {
        Ok(row) => CounterResponse::success(row.count),
        Err(err @ StoreError::CounterNotFound) => {
            tracing::warn!("counter row missing on read");
            CounterResponse::failure(err.code())
        }
        Err(err) => {
            tracing::error!(error = %err, "counter read failed");
            CounterResponse::failure(err.code())
        }
    };

    Json(response)
}

/// `POST /api/increment` — Atomically increment the counter.
#[utoipa::path(
    post,
    path = "/api/increment",
    tag = "Counter",
    summary = "Increment the counter",
    description = "Atomically adds one to the shared counter and returns the new value. Failures are reported in-band via the `success` flag; the status is always 200.",
    responses(
        (status = 200, description = "Post-increment value or in-band error", body = CounterResponse),
    )
)]
pub async fn increment(State(state): State<AppState>) -> impl IntoResponse {
    let response = match state.store.increment().await {
        Ok(count) => CounterResponse::success(count),
        Err(err @ StoreError::CounterNotFound) => {
            tracing::warn!("counter row missing on increment");
            CounterResponse::failure(err.code())
        }
        Err(err) => {
            tracing::error!(error = %err, "counter increment failed");
            CounterResponse::failure(err.code())
        }
    };

    Json(response)
}

/// Counter routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/count", get(get_count))
        .route("/increment", post(increment))
}
