//! Database models for the counter table.

use serde::{Deserialize, Serialize};

/// A row from the `counter` table.
///
/// Exactly one row with `id == 1` exists after initialization; it is the
/// singleton counter this service exposes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow)]
pub struct CounterRow {
    /// Row identity. Fixed at 1 for the singleton counter.
    pub id: i32,
    /// Current counter value, mutated only by increments.
    pub count: i32,
}
