//! Pull request repository port.
//!
//! # Design
//!
//! - **Batch-oriented**: the cascade path reads and writes every affected
//!   pull request in a single call each
//! - **Full reviewer lists**: loaded aggregates always carry every reviewer,
//!   not only the ones a query matched on

use crate::domain::foundation::{DomainError, PullRequestId, UserId};
use crate::domain::pull_request::PullRequest;
use async_trait::async_trait;

/// An unmerged pull request together with the reviewers a query matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestWithMatchedReviewers {
    pub pull_request: PullRequest,
    /// Matched reviewer IDs, in the pull request's reviewer order.
    pub matched_reviewer_ids: Vec<UserId>,
}

/// Repository port for PullRequest aggregate persistence.
#[async_trait]
pub trait PullRequestRepository: Send {
    /// Find a pull request by ID.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the pull request doesn't exist
    async fn get_by_id(&mut self, id: &PullRequestId) -> Result<PullRequest, DomainError>;

    /// All pull requests (any status) that list `reviewer_id` as a reviewer.
    async fn get_many_by_reviewer_id(
        &mut self,
        reviewer_id: &UserId,
    ) -> Result<Vec<PullRequest>, DomainError>;

    /// All open pull requests reviewed by any of `reviewer_ids`.
    ///
    /// Results are ordered by pull request ID. An empty input yields an
    /// empty result.
    async fn get_all_unmerged_with_any_of_reviewers(
        &mut self,
        reviewer_ids: &[UserId],
    ) -> Result<Vec<PullRequestWithMatchedReviewers>, DomainError>;

    /// Persist a new pull request.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the ID is taken
    async fn create(&mut self, pull_request: &PullRequest) -> Result<(), DomainError>;

    /// Update status, merge time, and the full reviewer list.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the pull request doesn't exist
    async fn save(&mut self, pull_request: &PullRequest) -> Result<(), DomainError>;

    /// Update several pull requests in one round trip.
    async fn save_many(&mut self, pull_requests: &[PullRequest]) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_request_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &mut dyn PullRequestRepository) {}
    }
}
