//! Shared application state injected into all Axum handlers.

use crate::persistence::CounterStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Constructed once in `main` after the store is initialized; cloning is
/// cheap because [`CounterStore`] wraps a pooled connection handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Counter storage backed by the PostgreSQL pool.
    pub store: CounterStore,
}
