//! Reviewer Roster - Pull request reviewer assignment
//!
//! Teams own users, users author pull requests, and every new pull request
//! gets up to two active reviewers from its author's team. Deactivating
//! users pulls them off open pull requests and refills the freed slots in
//! the same transaction.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
