//! Wire types for the HTTP API.
//!
//! Field names follow the public API contract (`pull_request_id`,
//! `assigned_reviewers`, `mergedAt`, ...) rather than the domain's naming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    DeactivateUsersResult, ReassignReviewerResult, ReviewedPullRequestView, TeamMemberView,
    TeamView, UserView, UserWithTeamView,
};
use crate::domain::pull_request::PullRequestView;

// ════════════════════════════════════════════════════════════════════════════
// Teams
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamRequest {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberDto>,
}

#[derive(Debug, Serialize)]
pub struct TeamDto {
    pub team_name: String,
    pub members: Vec<TeamMemberDto>,
}

#[derive(Debug, Serialize)]
pub struct AddTeamResponse {
    pub team: TeamDto,
}

#[derive(Debug, Deserialize)]
pub struct TeamNameQuery {
    pub team_name: String,
}

impl From<TeamMemberView> for TeamMemberDto {
    fn from(view: TeamMemberView) -> Self {
        Self {
            user_id: view.id.to_string(),
            username: view.name,
            is_active: view.active,
        }
    }
}

impl From<TeamView> for TeamDto {
    fn from(view: TeamView) -> Self {
        Self {
            team_name: view.name.to_string(),
            members: view.members.into_iter().map(Into::into).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct UserWithTeamDto {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct SetIsActiveResponse {
    pub user: UserWithTeamDto,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewedPullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct GetReviewResponse {
    pub user_id: String,
    pub pull_requests: Vec<ReviewedPullRequestDto>,
}

#[derive(Debug, Deserialize)]
pub struct DeactivateUsersRequest {
    #[serde(default)]
    pub user_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct DeactivateUsersResponse {
    pub users: Vec<UserDto>,
    pub reassigned_pull_requests: Vec<String>,
}

impl From<UserWithTeamView> for UserWithTeamDto {
    fn from(view: UserWithTeamView) -> Self {
        Self {
            user_id: view.id.to_string(),
            username: view.name,
            team_name: view.team_name.to_string(),
            is_active: view.active,
        }
    }
}

impl From<ReviewedPullRequestView> for ReviewedPullRequestDto {
    fn from(view: ReviewedPullRequestView) -> Self {
        Self {
            pull_request_id: view.id.to_string(),
            pull_request_name: view.name,
            author_id: view.author_id.to_string(),
            status: view.status.as_str().to_string(),
        }
    }
}

impl From<UserView> for UserDto {
    fn from(view: UserView) -> Self {
        Self {
            user_id: view.id.to_string(),
            username: view.name,
            is_active: view.active,
        }
    }
}

impl From<DeactivateUsersResult> for DeactivateUsersResponse {
    fn from(result: DeactivateUsersResult) -> Self {
        Self {
            users: result.users.into_iter().map(Into::into).collect(),
            reassigned_pull_requests: result
                .reassigned_pull_request_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pull requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_reviewer_id: String,
}

#[derive(Debug, Serialize)]
pub struct PullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PullRequestResponse {
    pub pr: PullRequestDto,
}

#[derive(Debug, Serialize)]
pub struct ReassignReviewerResponse {
    pub pr: PullRequestDto,
    pub replaced_by: String,
}

impl From<PullRequestView> for PullRequestDto {
    fn from(view: PullRequestView) -> Self {
        Self {
            pull_request_id: view.id.to_string(),
            pull_request_name: view.name,
            author_id: view.author_id.to_string(),
            status: view.status.as_str().to_string(),
            assigned_reviewers: view.reviewer_ids.iter().map(ToString::to_string).collect(),
            merged_at: view.merged_at.map(|t| *t.as_datetime()),
        }
    }
}

impl From<ReassignReviewerResult> for ReassignReviewerResponse {
    fn from(result: ReassignReviewerResult) -> Self {
        Self {
            pr: result.pull_request.into(),
            replaced_by: result.replaced_by.to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}
