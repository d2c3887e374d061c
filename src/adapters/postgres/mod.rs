//! PostgreSQL adapters.
//!
//! One [`PostgresTransaction`] implements every repository port, so all
//! repository calls made through it share a single database transaction.

mod errors;
mod pull_request_repository;
mod store;
mod team_repository;
mod user_repository;

pub use store::{PostgresStore, PostgresTransaction};
