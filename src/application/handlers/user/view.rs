//! User read models.

use serde::Serialize;

use crate::domain::foundation::{PullRequestId, TeamName, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestStatus};
use crate::domain::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            active: user.is_active(),
        }
    }
}

/// A user together with the team they currently belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithTeamView {
    pub id: UserId,
    pub name: String,
    pub team_name: TeamName,
    pub active: bool,
}

/// Summary of a pull request a user is asked to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewedPullRequestView {
    pub id: PullRequestId,
    pub name: String,
    pub author_id: UserId,
    pub status: PullRequestStatus,
}

impl From<&PullRequest> for ReviewedPullRequestView {
    fn from(pr: &PullRequest) -> Self {
        Self {
            id: pr.id().clone(),
            name: pr.name().to_string(),
            author_id: pr.author_id().clone(),
            status: pr.status(),
        }
    }
}
