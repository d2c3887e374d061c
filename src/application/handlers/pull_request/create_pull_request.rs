//! CreatePullRequestHandler - Command handler for opening pull requests.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{PickReviewersRequest, ReviewerPicker};
use crate::domain::foundation::{DomainError, ErrorCode, PullRequestId, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestView, MAX_REVIEWERS};
use crate::ports::Store;

/// Command to open a new pull request.
#[derive(Debug, Clone)]
pub struct CreatePullRequestCommand {
    pub id: PullRequestId,
    pub name: String,
    pub author_id: UserId,
}

/// Handler for opening pull requests with auto-assigned reviewers.
pub struct CreatePullRequestHandler {
    store: Arc<dyn Store>,
    picker: Arc<dyn ReviewerPicker>,
}

impl CreatePullRequestHandler {
    pub fn new(store: Arc<dyn Store>, picker: Arc<dyn ReviewerPicker>) -> Self {
        Self { store, picker }
    }

    pub async fn handle(
        &self,
        cmd: CreatePullRequestCommand,
    ) -> Result<PullRequestView, DomainError> {
        let mut tx = self.store.begin().await?;

        // 1. Resolve the author's current team; it becomes the PR's original team
        let team = tx
            .teams()
            .get_by_member_id(&cmd.author_id)
            .await
            .map_err(|e| e.context("resolving author team"))?;

        let mut pull_request = PullRequest::open(
            cmd.id,
            cmd.name,
            cmd.author_id.clone(),
            team.name().clone(),
        )?;

        // 2. Pick up to two reviewers; an empty team is not an error here
        let request = PickReviewersRequest {
            team: &team,
            exclude: std::slice::from_ref(&cmd.author_id),
            want_count: MAX_REVIEWERS,
        };
        let picked = match self.picker.pick_reviewers(tx.users(), request).await {
            Ok(ids) => ids,
            Err(e) if e.is(ErrorCode::NoCandidate) => {
                warn!(
                    pull_request_id = %pull_request.id(),
                    team = %team.name(),
                    "No reviewer candidates, opening pull request without reviewers"
                );
                Vec::new()
            }
            Err(e) => return Err(e.context("picking reviewers")),
        };

        for reviewer_id in picked {
            pull_request
                .assign_reviewer(reviewer_id)
                .map_err(|e| e.context("assigning reviewer"))?;
        }

        // 3. Persist
        tx.pull_requests()
            .create(&pull_request)
            .await
            .map_err(|e| e.context("saving pull request"))?;
        tx.commit().await?;

        info!(
            pull_request_id = %pull_request.id(),
            team = %pull_request.original_team(),
            reviewers = pull_request.reviewer_ids().len(),
            "Pull request created"
        );

        Ok(pull_request.to_view())
    }
}
