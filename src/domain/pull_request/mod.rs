//! Pull request domain module.
//!
//! Owns the reviewer-set invariants and the merge lifecycle.

mod aggregate;
mod status;

pub use aggregate::{PullRequest, PullRequestView, MAX_REVIEWERS};
pub use status::PullRequestStatus;
