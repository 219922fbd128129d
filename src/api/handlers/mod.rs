//! REST endpoint handlers organized by resource.

pub mod counter;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all counter routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    counter::routes()
}
