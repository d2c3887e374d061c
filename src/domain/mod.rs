//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `pull_request` - Pull request aggregate and reviewer-set invariants
//! - `team` - Team aggregate and membership
//! - `user` - User aggregate and active flag

pub mod foundation;
pub mod pull_request;
pub mod team;
pub mod user;
