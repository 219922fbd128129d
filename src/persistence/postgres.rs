//! PostgreSQL implementation of the counter store.

use sqlx::PgPool;

use super::models::CounterRow;
use crate::error::StoreError;

/// PostgreSQL-backed counter storage using `sqlx::PgPool`.
///
/// Constructed explicitly from a pool and handed to the HTTP layer through
/// application state. Atomicity of the increment is delegated entirely to
/// PostgreSQL: it is one `UPDATE ... RETURNING` statement, never a separate
/// read followed by a write.
#[derive(Debug, Clone)]
pub struct CounterStore {
    pool: PgPool,
}

impl CounterStore {
    /// Creates a new counter store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently ensures the `counter` table and the singleton row exist.
    ///
    /// Both statements are no-ops when their target already exists, so a
    /// counter surviving from a previous run keeps its value. Must complete
    /// before the server starts accepting requests.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] on any database failure. Callers
    /// treat this as fatal.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS counter (id INTEGER PRIMARY KEY, count INTEGER)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("INSERT INTO counter (id, count) VALUES (1, 0) ON CONFLICT DO NOTHING")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches the singleton counter row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CounterNotFound`] if the row is absent and
    /// [`StoreError::Database`] on any database failure.
    pub async fn fetch(&self) -> Result<CounterRow, StoreError> {
        let row = sqlx::query_as::<_, CounterRow>("SELECT id, count FROM counter WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or(StoreError::CounterNotFound)
    }

    /// Atomically increments the singleton counter and returns the new value.
    ///
    /// The read-modify-write happens inside one SQL statement, so concurrent
    /// callers each observe a consistent prior value and no update is lost.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CounterNotFound`] if the row is absent and
    /// [`StoreError::Database`] on any database failure.
    pub async fn increment(&self) -> Result<i32, StoreError> {
        let count = sqlx::query_scalar::<_, i32>(
            "UPDATE counter SET count = count + 1 WHERE id = 1 RETURNING count",
        )
        .fetch_optional(&self.pool)
        .await?;

        count.ok_or(StoreError::CounterNotFound)
    }
}
