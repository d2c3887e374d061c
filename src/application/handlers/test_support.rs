//! Fixtures shared by handler tests.

use std::sync::Arc;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::random::ScriptedRandomSource;
use crate::application::{RandomReviewerPicker, ReviewerPicker};
use crate::domain::foundation::{PullRequestId, TeamName, UserId};
use crate::domain::pull_request::PullRequest;
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::ports::Store;

pub fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub fn prid(s: &str) -> PullRequestId {
    PullRequestId::new(s).unwrap()
}

pub fn team_name(s: &str) -> TeamName {
    TeamName::new(s).unwrap()
}

/// Picker that always takes the first remaining candidate.
pub fn first_picker() -> Arc<dyn ReviewerPicker> {
    Arc::new(RandomReviewerPicker::new(Arc::new(ScriptedRandomSource::first())))
}

/// Saves a team and its members, `(id, active)` each.
pub async fn seed_team(store: &InMemoryStore, name: &str, members: &[(&str, bool)]) {
    let team = Team::new(team_name(name), members.iter().map(|(id, _)| uid(id)).collect()).unwrap();
    let users: Vec<User> = members
        .iter()
        .map(|(id, active)| User::new(uid(id), format!("user {}", id), *active).unwrap())
        .collect();

    let mut tx = store.begin().await.unwrap();
    tx.users().save_many(&users).await.unwrap();
    tx.teams().save(&team).await.unwrap();
    tx.commit().await.unwrap();
}

/// Saves an open pull request with the given reviewers.
pub async fn seed_pull_request(
    store: &InMemoryStore,
    id: &str,
    author: &str,
    team: &str,
    reviewers: &[&str],
) {
    let mut pr = PullRequest::open(prid(id), format!("PR {}", id), uid(author), team_name(team))
        .unwrap();
    for reviewer in reviewers {
        pr.assign_reviewer(uid(reviewer)).unwrap();
    }

    let mut tx = store.begin().await.unwrap();
    tx.pull_requests().create(&pr).await.unwrap();
    tx.commit().await.unwrap();
}
