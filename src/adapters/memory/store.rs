//! In-Memory Store Adapter
//!
//! Keeps teams, users, and pull requests in process memory.
//! Useful for testing and local development.
//!
//! A transaction takes the store's lock for its whole lifetime and works on
//! a private copy of the state. `commit` swaps the copy in; dropping the
//! transaction discards it. Transactions are therefore fully serialized.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::{DomainError, ErrorCode, PullRequestId, TeamName, UserId};
use crate::domain::pull_request::PullRequest;
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::ports::{
    PullRequestRepository, PullRequestWithMatchedReviewers, Store, StoreTransaction,
    TeamRepository, UserRepository,
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    teams: BTreeMap<TeamName, Team>,
    users: HashMap<UserId, User>,
    pull_requests: BTreeMap<PullRequestId, PullRequest>,
}

/// In-memory implementation of [`Store`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a committed user (useful for tests)
    pub async fn user(&self, id: &UserId) -> Option<User> {
        self.state.lock().await.users.get(id).cloned()
    }

    /// Read a committed pull request (useful for tests)
    pub async fn pull_request(&self, id: &PullRequestId) -> Option<PullRequest> {
        self.state.lock().await.pull_requests.get(id).cloned()
    }

    /// Number of committed pull requests
    pub async fn pull_request_count(&self) -> usize {
        self.state.lock().await.pull_requests.len()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }
}

/// Transaction over an [`InMemoryStore`].
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    fn teams(&mut self) -> &mut dyn TeamRepository {
        self
    }

    fn users(&mut self) -> &mut dyn UserRepository {
        self
    }

    fn pull_requests(&mut self) -> &mut dyn PullRequestRepository {
        self
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryTransaction {
    async fn get_by_name(&mut self, name: &TeamName) -> Result<Team, DomainError> {
        self.working
            .teams
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::not_found("team", name))
    }

    async fn get_by_member_id(&mut self, member_id: &UserId) -> Result<Team, DomainError> {
        self.working
            .teams
            .values()
            .find(|team| team.has_member(member_id))
            .cloned()
            .ok_or_else(|| DomainError::not_found("team with member", member_id))
    }

    async fn get_many_by_names(
        &mut self,
        names: &[TeamName],
    ) -> Result<HashMap<TeamName, Team>, DomainError> {
        let mut found = HashMap::with_capacity(names.len());
        for name in names {
            let team = self
                .working
                .teams
                .get(name)
                .ok_or_else(|| DomainError::not_found("team", name))?;
            found.insert(name.clone(), team.clone());
        }
        Ok(found)
    }

    async fn save(&mut self, team: &Team) -> Result<(), DomainError> {
        if self.working.teams.contains_key(team.name()) {
            return Err(DomainError::already_exists("team", team.name()));
        }

        // A user belongs to at most one team.
        for member_id in team.member_ids() {
            if self.working.teams.values().any(|t| t.has_member(member_id)) {
                return Err(member_in_other_team(member_id));
            }
        }

        self.working.teams.insert(team.name().clone(), team.clone());
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryTransaction {
    async fn get(&mut self, id: &UserId) -> Result<User, DomainError> {
        self.working
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user", id))
    }

    async fn get_many(&mut self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let mut seen = HashSet::with_capacity(ids.len());
        Ok(ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.working.users.get(id).cloned())
            .collect())
    }

    async fn save(&mut self, user: &User) -> Result<(), DomainError> {
        self.working.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn save_many(&mut self, users: &[User]) -> Result<(), DomainError> {
        for user in users {
            self.working.users.insert(user.id().clone(), user.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryTransaction {
    async fn get_by_id(&mut self, id: &PullRequestId) -> Result<PullRequest, DomainError> {
        self.working
            .pull_requests
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("pull request", id))
    }

    async fn get_many_by_reviewer_id(
        &mut self,
        reviewer_id: &UserId,
    ) -> Result<Vec<PullRequest>, DomainError> {
        Ok(self
            .working
            .pull_requests
            .values()
            .filter(|pr| pr.has_reviewer(reviewer_id))
            .cloned()
            .collect())
    }

    async fn get_all_unmerged_with_any_of_reviewers(
        &mut self,
        reviewer_ids: &[UserId],
    ) -> Result<Vec<PullRequestWithMatchedReviewers>, DomainError> {
        let wanted: HashSet<&UserId> = reviewer_ids.iter().collect();

        Ok(self
            .working
            .pull_requests
            .values()
            .filter(|pr| !pr.is_merged())
            .filter_map(|pr| {
                let matched: Vec<UserId> = pr
                    .reviewer_ids()
                    .iter()
                    .filter(|id| wanted.contains(id))
                    .cloned()
                    .collect();
                (!matched.is_empty()).then(|| PullRequestWithMatchedReviewers {
                    pull_request: pr.clone(),
                    matched_reviewer_ids: matched,
                })
            })
            .collect())
    }

    async fn create(&mut self, pull_request: &PullRequest) -> Result<(), DomainError> {
        if self.working.pull_requests.contains_key(pull_request.id()) {
            return Err(DomainError::already_exists("pull request", pull_request.id()));
        }
        self.working
            .pull_requests
            .insert(pull_request.id().clone(), pull_request.clone());
        Ok(())
    }

    async fn save(&mut self, pull_request: &PullRequest) -> Result<(), DomainError> {
        match self.working.pull_requests.get_mut(pull_request.id()) {
            Some(stored) => {
                *stored = pull_request.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("pull request", pull_request.id())),
        }
    }

    async fn save_many(&mut self, pull_requests: &[PullRequest]) -> Result<(), DomainError> {
        for pull_request in pull_requests {
            PullRequestRepository::save(self, pull_request).await?;
        }
        Ok(())
    }
}

fn member_in_other_team(member_id: &UserId) -> DomainError {
    DomainError::new(
        ErrorCode::MemberInOtherTeam,
        format!("user {} already belongs to another team", member_id),
    )
    .with_detail("user_id", member_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn team(name: &str, members: &[&str]) -> Team {
        Team::new(
            TeamName::new(name).unwrap(),
            members.iter().map(|m| uid(m)).collect(),
        )
        .unwrap()
    }

    fn pr(id: &str, author: &str, reviewers: &[&str]) -> PullRequest {
        let mut pr = PullRequest::open(
            PullRequestId::new(id).unwrap(),
            format!("PR {}", id),
            uid(author),
            TeamName::new("backend").unwrap(),
        )
        .unwrap();
        for r in reviewers {
            pr.assign_reviewer(uid(r)).unwrap();
        }
        pr
    }

    #[tokio::test]
    async fn committed_writes_are_visible() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.users()
            .save(&User::new(uid("a"), "Alice", true).unwrap())
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert!(store.user(&uid("a")).await.is_some());
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let store = InMemoryStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.users()
                .save(&User::new(uid("a"), "Alice", true).unwrap())
                .await
                .unwrap();
        }

        assert!(store.user(&uid("a")).await.is_none());
    }

    #[tokio::test]
    async fn team_save_rejects_taken_name_and_membership() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.teams().save(&team("backend", &["a"])).await.unwrap();

        let dup_name = tx.teams().save(&team("backend", &["b"])).await.unwrap_err();
        let dup_member = tx.teams().save(&team("frontend", &["a"])).await.unwrap_err();

        assert_eq!(dup_name.code, ErrorCode::AlreadyExists);
        assert_eq!(dup_member.code, ErrorCode::MemberInOtherTeam);
        assert_eq!(dup_member.details.get("user_id"), Some(&"a".to_string()));
    }

    #[tokio::test]
    async fn get_many_by_names_fails_on_missing_team() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.teams().save(&team("backend", &["a"])).await.unwrap();

        let names = vec![TeamName::new("backend").unwrap(), TeamName::new("ghost").unwrap()];
        let err = tx.teams().get_many_by_names(&names).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn unmerged_query_reports_matched_reviewers_in_order() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.pull_requests().create(&pr("pr-2", "a", &["c", "b"])).await.unwrap();
        tx.pull_requests().create(&pr("pr-1", "a", &["b", "d"])).await.unwrap();
        let mut merged = pr("pr-3", "a", &["b"]);
        merged.merge();
        tx.pull_requests().create(&merged).await.unwrap();

        let found = tx
            .pull_requests()
            .get_all_unmerged_with_any_of_reviewers(&[uid("b"), uid("c")])
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].pull_request.id().as_str(), "pr-1");
        assert_eq!(found[0].matched_reviewer_ids, vec![uid("b")]);
        assert_eq!(found[1].matched_reviewer_ids, vec![uid("c"), uid("b")]);
        assert_eq!(found[1].pull_request.reviewer_ids().len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_pull_request() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.pull_requests().create(&pr("pr-1", "a", &[])).await.unwrap();

        let err = tx.pull_requests().create(&pr("pr-1", "a", &[])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn get_many_users_skips_unknown_ids_and_keeps_order() {
        let store = InMemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.users()
            .save_many(&[
                User::new(uid("a"), "Alice", true).unwrap(),
                User::new(uid("b"), "Bob", false).unwrap(),
            ])
            .await
            .unwrap();

        let users = tx
            .users()
            .get_many(&[uid("b"), uid("ghost"), uid("a")])
            .await
            .unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
