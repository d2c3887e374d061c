//! PullRequest aggregate entity.
//!
//! The aggregate is the only place reviewer-set invariants are enforced.
//! Application handlers load it, call the mutations below, and persist it;
//! they never edit the reviewer list directly.

use crate::domain::foundation::{
    DomainError, ErrorCode, PullRequestId, TeamName, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

use super::PullRequestStatus;

/// Maximum number of reviewers attached to one pull request.
pub const MAX_REVIEWERS: usize = 2;

/// PullRequest aggregate.
///
/// # Invariants
///
/// - `reviewer_ids.len() <= MAX_REVIEWERS`
/// - `reviewer_ids` contains no duplicates
/// - `original_team` is fixed at creation
/// - Once merged, status and reviewers are frozen and `merged_at` never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    id: PullRequestId,
    name: String,
    status: PullRequestStatus,
    original_team: TeamName,
    author_id: UserId,
    reviewer_ids: Vec<UserId>,
    merged_at: Option<Timestamp>,
}

impl PullRequest {
    /// Create a new open pull request with no reviewers.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if name is blank
    pub fn open(
        id: PullRequestId,
        name: impl Into<String>,
        author_id: UserId,
        original_team: TeamName,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("pull_request_name").into());
        }

        Ok(Self {
            id,
            name,
            status: PullRequestStatus::Open,
            original_team,
            author_id,
            reviewer_ids: Vec::new(),
            merged_at: None,
        })
    }

    /// Reconstitute a pull request from persistence (no validation).
    pub fn reconstitute(
        id: PullRequestId,
        name: String,
        status: PullRequestStatus,
        original_team: TeamName,
        author_id: UserId,
        reviewer_ids: Vec<UserId>,
        merged_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            name,
            status,
            original_team,
            author_id,
            reviewer_ids,
            merged_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PullRequestId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// The author's team at creation time; all reviewer picks draw from it.
    pub fn original_team(&self) -> &TeamName {
        &self.original_team
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Reviewers in assignment order.
    pub fn reviewer_ids(&self) -> &[UserId] {
        &self.reviewer_ids
    }

    pub fn merged_at(&self) -> Option<&Timestamp> {
        self.merged_at.as_ref()
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &UserId) -> bool {
        self.reviewer_ids.contains(user_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Merge the pull request.
    ///
    /// Idempotent: merging an already merged pull request keeps the original
    /// `merged_at`.
    pub fn merge(&mut self) {
        if self.is_merged() {
            return;
        }
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(Timestamp::now());
    }

    /// Append a reviewer, preserving assignment order.
    ///
    /// # Errors
    ///
    /// - `ModifyMergedPr` if merged
    /// - `TooManyReviewers` if already at `MAX_REVIEWERS`
    /// - `CandidateAlreadyReviewer` if the user is already assigned
    pub fn assign_reviewer(&mut self, user_id: UserId) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        if self.reviewer_ids.len() >= MAX_REVIEWERS {
            return Err(DomainError::new(
                ErrorCode::TooManyReviewers,
                format!(
                    "pull request {} already has {} reviewers",
                    self.id, MAX_REVIEWERS
                ),
            ));
        }

        if self.has_reviewer(&user_id) {
            return Err(DomainError::new(
                ErrorCode::CandidateAlreadyReviewer,
                format!("user {} already reviews pull request {}", user_id, self.id),
            ));
        }

        self.reviewer_ids.push(user_id);
        Ok(())
    }

    /// Remove a reviewer, preserving the order of the rest.
    ///
    /// # Errors
    ///
    /// - `ModifyMergedPr` if merged
    /// - `NotPreviouslyAssigned` if the user is not a reviewer
    pub fn unassign_reviewer(&mut self, user_id: &UserId) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        let Some(ix) = self.reviewer_ids.iter().position(|id| id == user_id) else {
            return Err(DomainError::new(
                ErrorCode::NotPreviouslyAssigned,
                format!("reviewer {} is not assigned to pull request {}", user_id, self.id),
            ));
        };

        self.reviewer_ids.remove(ix);
        Ok(())
    }

    /// Snapshot for callers outside the domain.
    pub fn to_view(&self) -> PullRequestView {
        PullRequestView {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
            reviewer_ids: self.reviewer_ids.clone(),
            merged_at: self.merged_at,
        }
    }

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::ModifyMergedPr,
                format!("cannot modify merged pull request {}", self.id),
            ))
        }
    }
}

/// Read-only projection of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestView {
    pub id: PullRequestId,
    pub name: String,
    pub author_id: UserId,
    pub status: PullRequestStatus,
    pub reviewer_ids: Vec<UserId>,
    pub merged_at: Option<Timestamp>,
}
