//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory store for tests and local runs
//! - `postgres` - PostgreSQL store (sqlx)
//! - `random` - Random sources for reviewer picking
//! - `http` - REST API (axum)

pub mod http;
pub mod memory;
pub mod postgres;
pub mod random;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use random::{ScriptedRandomSource, SeededRandomSource, ThreadRandomSource};
