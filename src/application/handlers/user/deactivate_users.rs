//! DeactivateUsersHandler - Bulk deactivation with reviewer cascade.
//!
//! Deactivating a user pulls them off every open pull request they review
//! and tries to find replacements in each pull request's original team.
//! The whole cascade and the flag flip commit together or not at all.
//!
//! # Flow
//!
//! 1. Load every open pull request reviewed by any deactivated user
//! 2. Batch-load the original teams of those pull requests
//! 3. Per pull request: unassign the matched reviewers, pick replacements
//! 4. Batch-save the pull requests, then the deactivated users

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::application::{PickReviewersRequest, ReviewerPicker};
use crate::domain::foundation::{DomainError, ErrorCode, PullRequestId, TeamName, UserId};
use crate::ports::{PullRequestWithMatchedReviewers, Store, StoreTransaction};

use super::view::UserView;

/// Command to deactivate a batch of users.
#[derive(Debug, Clone)]
pub struct DeactivateUsersCommand {
    pub user_ids: Vec<UserId>,
}

/// Result of a deactivation.
#[derive(Debug, Clone, Serialize)]
pub struct DeactivateUsersResult {
    /// The deactivated users, in request order.
    pub users: Vec<UserView>,
    /// Open pull requests whose reviewer list changed.
    pub reassigned_pull_request_ids: Vec<PullRequestId>,
}

/// Handler for bulk deactivation.
pub struct DeactivateUsersHandler {
    store: Arc<dyn Store>,
    picker: Arc<dyn ReviewerPicker>,
}

impl DeactivateUsersHandler {
    pub fn new(store: Arc<dyn Store>, picker: Arc<dyn ReviewerPicker>) -> Self {
        Self { store, picker }
    }

    pub async fn handle(
        &self,
        cmd: DeactivateUsersCommand,
    ) -> Result<DeactivateUsersResult, DomainError> {
        let user_ids = dedupe(cmd.user_ids);
        if user_ids.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidId,
                "at least one user id is required",
            )
            .with_detail("field", "user_ids"));
        }

        let mut tx = self.store.begin().await?;

        let reassigned =
            reassign_reviewed_pull_requests(tx.as_mut(), self.picker.as_ref(), &user_ids)
                .await
                .map_err(|e| e.context("reassigning reviewed pull requests"))?;

        let mut users = tx
            .users()
            .get_many(&user_ids)
            .await
            .map_err(|e| e.context("retrieving users"))?;

        if users.len() != user_ids.len() {
            let found: HashSet<&UserId> = users.iter().map(|u| u.id()).collect();
            if let Some(missing) = user_ids.iter().find(|id| !found.contains(id)) {
                return Err(DomainError::not_found("user", missing));
            }
        }

        for user in &mut users {
            user.set_active(false);
        }

        tx.users()
            .save_many(&users)
            .await
            .map_err(|e| e.context("saving users"))?;
        tx.commit().await?;

        info!(
            users = users.len(),
            reassigned_pull_requests = reassigned.len(),
            "Users deactivated"
        );

        Ok(DeactivateUsersResult {
            users: users.iter().map(UserView::from).collect(),
            reassigned_pull_request_ids: reassigned,
        })
    }
}

/// Take `deactivated` off every open pull request they review and refill
/// the freed slots from each pull request's original team.
///
/// Must run inside the caller's transaction. Returns the IDs of the pull
/// requests that were rewritten, in processing order.
async fn reassign_reviewed_pull_requests(
    tx: &mut dyn StoreTransaction,
    picker: &dyn ReviewerPicker,
    deactivated: &[UserId],
) -> Result<Vec<PullRequestId>, DomainError> {
    let matches = tx
        .pull_requests()
        .get_all_unmerged_with_any_of_reviewers(deactivated)
        .await
        .map_err(|e| e.context("retrieving reviewed pull requests"))?;

    if matches.is_empty() {
        return Ok(Vec::new());
    }

    let teams = tx
        .teams()
        .get_many_by_names(&unique_team_names(&matches))
        .await
        .map_err(|e| e.context("retrieving teams"))?;

    let mut touched = Vec::with_capacity(matches.len());
    for PullRequestWithMatchedReviewers {
        mut pull_request,
        matched_reviewer_ids,
    } in matches
    {
        for reviewer_id in &matched_reviewer_ids {
            pull_request
                .unassign_reviewer(reviewer_id)
                .map_err(|e| e.context("unassigning reviewer"))?;
        }

        let team = teams
            .get(pull_request.original_team())
            .ok_or_else(|| DomainError::not_found("team", pull_request.original_team()))?;

        // Every deactivated user is excluded, matched on this PR or not:
        // their flags are only flipped after the cascade.
        let mut exclude = deactivated.to_vec();
        exclude.push(pull_request.author_id().clone());
        exclude.extend(pull_request.reviewer_ids().iter().cloned());

        let request = PickReviewersRequest {
            team,
            exclude: &exclude,
            want_count: matched_reviewer_ids.len(),
        };
        let replacements = match picker.pick_reviewers(tx.users(), request).await {
            Ok(ids) => ids,
            Err(e) if e.is(ErrorCode::NoCandidate) => Vec::new(),
            Err(e) => return Err(e.context("picking replacements")),
        };

        if replacements.len() < matched_reviewer_ids.len() {
            warn!(
                pull_request_id = %pull_request.id(),
                team = %team.name(),
                removed = matched_reviewer_ids.len(),
                replaced = replacements.len(),
                "Pull request left with fewer reviewers"
            );
        }

        for reviewer_id in replacements {
            pull_request
                .assign_reviewer(reviewer_id)
                .map_err(|e| e.context("assigning replacement"))?;
        }

        touched.push(pull_request);
    }

    tx.pull_requests()
        .save_many(&touched)
        .await
        .map_err(|e| e.context("saving pull requests"))?;

    Ok(touched.iter().map(|pr| pr.id().clone()).collect())
}

fn unique_team_names(matches: &[PullRequestWithMatchedReviewers]) -> Vec<TeamName> {
    let mut seen = HashSet::new();
    matches
        .iter()
        .map(|m| m.pull_request.original_team())
        .filter(|name| seen.insert(*name))
        .cloned()
        .collect()
}

fn dedupe(ids: Vec<UserId>) -> Vec<UserId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
