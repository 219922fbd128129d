//! Persistence layer: PostgreSQL-backed counter storage.
//!
//! The counter is a single row (id = 1) in the `counter` table. All reads
//! and writes go through [`CounterStore`], a thin typed wrapper over
//! `sqlx::PgPool` for async PostgreSQL access.

pub mod models;
pub mod postgres;

pub use postgres::CounterStore;
