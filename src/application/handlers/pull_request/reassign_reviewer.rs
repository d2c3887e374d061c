//! ReassignReviewerHandler - Command handler for swapping one reviewer.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::application::{PickReviewersRequest, ReviewerPicker};
use crate::domain::foundation::{DomainError, ErrorCode, PullRequestId, UserId};
use crate::domain::pull_request::PullRequestView;
use crate::ports::Store;

/// Command to replace a reviewer on an open pull request.
#[derive(Debug, Clone)]
pub struct ReassignReviewerCommand {
    pub pull_request_id: PullRequestId,
    pub old_reviewer_id: UserId,
}

/// Result of a successful reassignment.
#[derive(Debug, Clone, Serialize)]
pub struct ReassignReviewerResult {
    pub pull_request: PullRequestView,
    pub replaced_by: UserId,
}

/// Handler for replacing a single reviewer.
///
/// The replacement is drawn from the pull request's original team, not the
/// author's current one.
pub struct ReassignReviewerHandler {
    store: Arc<dyn Store>,
    picker: Arc<dyn ReviewerPicker>,
}

impl ReassignReviewerHandler {
    pub fn new(store: Arc<dyn Store>, picker: Arc<dyn ReviewerPicker>) -> Self {
        Self { store, picker }
    }

    pub async fn handle(
        &self,
        cmd: ReassignReviewerCommand,
    ) -> Result<ReassignReviewerResult, DomainError> {
        let mut tx = self.store.begin().await?;

        let mut pull_request = tx
            .pull_requests()
            .get_by_id(&cmd.pull_request_id)
            .await
            .map_err(|e| e.context("retrieving pull request"))?;

        // Status and membership checks come before any candidate lookup
        pull_request
            .unassign_reviewer(&cmd.old_reviewer_id)
            .map_err(|e| e.context("unassigning reviewer"))?;

        let team = tx
            .teams()
            .get_by_name(pull_request.original_team())
            .await
            .map_err(|e| e.context("retrieving original team"))?;

        let mut exclude = Vec::with_capacity(pull_request.reviewer_ids().len() + 2);
        exclude.push(cmd.old_reviewer_id.clone());
        exclude.push(pull_request.author_id().clone());
        exclude.extend(pull_request.reviewer_ids().iter().cloned());

        let request = PickReviewersRequest {
            team: &team,
            exclude: &exclude,
            want_count: 1,
        };
        let picked = self
            .picker
            .pick_reviewers(tx.users(), request)
            .await
            .map_err(|e| e.context("picking replacement"))?;
        let replaced_by = picked.into_iter().next().ok_or_else(|| {
            DomainError::new(
                ErrorCode::NoCandidate,
                format!("no active replacement candidate in team {}", team.name()),
            )
        })?;

        pull_request
            .assign_reviewer(replaced_by.clone())
            .map_err(|e| e.context("assigning reviewer"))?;

        tx.pull_requests()
            .save(&pull_request)
            .await
            .map_err(|e| e.context("saving pull request"))?;
        tx.commit().await?;

        info!(
            pull_request_id = %pull_request.id(),
            old_reviewer_id = %cmd.old_reviewer_id,
            new_reviewer_id = %replaced_by,
            "Reviewer reassigned"
        );

        Ok(ReassignReviewerResult {
            pull_request: pull_request.to_view(),
            replaced_by,
        })
    }
}
