//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `Store` / `StoreTransaction` - Atomic scope spanning all repositories
//! - `TeamRepository` - Teams and their membership
//! - `UserRepository` - Users and their active flag
//! - `PullRequestRepository` - Pull requests and reviewer lists
//!
//! ## Selection Ports
//!
//! - `RandomSource` - Injectable randomness for reviewer picking

mod pull_request_repository;
mod random_source;
mod store;
mod team_repository;
mod user_repository;

pub use pull_request_repository::{PullRequestRepository, PullRequestWithMatchedReviewers};
pub use random_source::RandomSource;
pub use store::{Store, StoreTransaction};
pub use team_repository::TeamRepository;
pub use user_repository::UserRepository;
