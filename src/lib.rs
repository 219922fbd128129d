//! # tally-service
//!
//! REST API service exposing a single shared counter backed by PostgreSQL.
//!
//! The counter is one database row (id = 1). The service offers two
//! operations — read the current value and atomically increment it — plus a
//! health probe. All consistency is delegated to PostgreSQL: the increment is
//! a single `UPDATE ... RETURNING` statement, so concurrent callers never
//! lose updates.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── CounterStore (persistence/)
//!     │
//!     └── PostgreSQL (counter table, singleton row id = 1)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
