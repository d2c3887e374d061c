//! Reviewer selection strategy.
//!
//! The picker is stateless apart from its random source. It reads user
//! records through the repository it is handed (so the read joins the
//! caller's transaction) and never writes anything.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::ports::{RandomSource, UserRepository};

/// Input to a reviewer pick.
#[derive(Debug, Clone, Copy)]
pub struct PickReviewersRequest<'a> {
    /// Team the candidates are drawn from.
    pub team: &'a Team,
    /// Users that must never be returned.
    pub exclude: &'a [UserId],
    /// Upper bound on the number of reviewers returned.
    pub want_count: usize,
}

/// Port for reviewer selection.
#[async_trait]
pub trait ReviewerPicker: Send + Sync {
    /// Pick up to `want_count` distinct active team members outside `exclude`.
    ///
    /// Returning fewer than `want_count` IDs is not an error; callers decide
    /// whether a partial result is acceptable.
    ///
    /// # Errors
    ///
    /// - `NoCandidate` if no active, non-excluded member exists
    async fn pick_reviewers(
        &self,
        users: &mut dyn UserRepository,
        request: PickReviewersRequest<'_>,
    ) -> Result<Vec<UserId>, DomainError>;
}

/// Uniform random selection without replacement.
pub struct RandomReviewerPicker {
    random: Arc<dyn RandomSource>,
}

impl RandomReviewerPicker {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl ReviewerPicker for RandomReviewerPicker {
    async fn pick_reviewers(
        &self,
        users: &mut dyn UserRepository,
        request: PickReviewersRequest<'_>,
    ) -> Result<Vec<UserId>, DomainError> {
        let excluded: HashSet<&UserId> = request.exclude.iter().collect();
        let candidate_ids: Vec<UserId> = request
            .team
            .member_ids()
            .iter()
            .filter(|id| !excluded.contains(id))
            .cloned()
            .collect();

        if candidate_ids.is_empty() {
            return Err(no_candidate(request.team));
        }

        let candidates = users
            .get_many(&candidate_ids)
            .await
            .map_err(|e| e.context("retrieving candidates"))?;

        let mut active: Vec<UserId> = candidates
            .into_iter()
            .filter(User::is_active)
            .map(|user| user.id().clone())
            .collect();

        if active.is_empty() {
            return Err(no_candidate(request.team));
        }

        let count = request.want_count.min(active.len());
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let ix = self.random.next_index(active.len());
            picked.push(active.remove(ix));
        }

        debug!(
            team = %request.team.name(),
            wanted = request.want_count,
            picked = picked.len(),
            "Picked reviewers"
        );

        Ok(picked)
    }
}

fn no_candidate(team: &Team) -> DomainError {
    DomainError::new(
        ErrorCode::NoCandidate,
        format!("no active replacement candidate in team {}", team.name()),
    )
    .with_detail("team", team.name().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::random::{ScriptedRandomSource, SeededRandomSource};
    use crate::domain::foundation::TeamName;
    use crate::ports::Store;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    async fn seeded_store(members: &[(&str, bool)]) -> (InMemoryStore, Team) {
        let store = InMemoryStore::new();
        let team = Team::new(
            TeamName::new("backend").unwrap(),
            members.iter().map(|(id, _)| uid(id)).collect(),
        )
        .unwrap();
        let users: Vec<User> = members
            .iter()
            .map(|(id, active)| User::new(uid(id), format!("user {}", id), *active).unwrap())
            .collect();

        let mut tx = store.begin().await.unwrap();
        tx.users().save_many(&users).await.unwrap();
        tx.teams().save(&team).await.unwrap();
        tx.commit().await.unwrap();

        (store, team)
    }

    async fn pick(
        store: &InMemoryStore,
        picker: &RandomReviewerPicker,
        team: &Team,
        exclude: &[UserId],
        want_count: usize,
    ) -> Result<Vec<UserId>, DomainError> {
        let mut tx = store.begin().await.unwrap();
        let request = PickReviewersRequest {
            team,
            exclude,
            want_count,
        };
        let result = picker.pick_reviewers(tx.users(), request).await;
        drop(tx);
        result
    }

    #[tokio::test]
    async fn picks_from_team_excluding_specified_users() {
        let (store, team) = seeded_store(&[("a", true), ("b", true), ("c", true)]).await;
        let picker = RandomReviewerPicker::new(Arc::new(ScriptedRandomSource::first()));

        let picked = pick(&store, &picker, &team, &[uid("a")], 2).await.unwrap();

        assert_eq!(picked, vec![uid("b"), uid("c")]);
    }

    #[tokio::test]
    async fn scripted_indices_select_without_replacement() {
        let (store, team) = seeded_store(&[("a", true), ("b", true), ("c", true)]).await;
        let picker = RandomReviewerPicker::new(Arc::new(ScriptedRandomSource::new(vec![2, 0])));

        let picked = pick(&store, &picker, &team, &[], 2).await.unwrap();

        assert_eq!(picked, vec![uid("c"), uid("a")]);
    }

    #[tokio::test]
    async fn fails_when_every_member_is_excluded() {
        let (store, team) = seeded_store(&[("a", true), ("b", true)]).await;
        let picker = RandomReviewerPicker::new(Arc::new(ScriptedRandomSource::first()));

        let err = pick(&store, &picker, &team, &[uid("a"), uid("b")], 1)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NoCandidate);
    }

    #[tokio::test]
    async fn fails_when_remaining_members_are_inactive() {
        let (store, team) = seeded_store(&[("a", true), ("b", false), ("c", false)]).await;
        let picker = RandomReviewerPicker::new(Arc::new(ScriptedRandomSource::first()));

        let err = pick(&store, &picker, &team, &[uid("a")], 2).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NoCandidate);
    }

    #[tokio::test]
    async fn returns_partial_result_when_few_candidates_are_active() {
        let (store, team) = seeded_store(&[("a", true), ("b", true), ("c", false)]).await;
        let picker = RandomReviewerPicker::new(Arc::new(ScriptedRandomSource::first()));

        let picked = pick(&store, &picker, &team, &[uid("a")], 2).await.unwrap();

        assert_eq!(picked, vec![uid("b")]);
    }

    #[tokio::test]
    async fn never_returns_excluded_or_duplicate_ids() {
        let members: Vec<(String, bool)> = (0..8).map(|i| (format!("u{}", i), i % 3 != 0)).collect();
        let member_refs: Vec<(&str, bool)> =
            members.iter().map(|(id, active)| (id.as_str(), *active)).collect();
        let (store, team) = seeded_store(&member_refs).await;
        let picker = RandomReviewerPicker::new(Arc::new(SeededRandomSource::new(42)));
        let exclude = vec![uid("u1"), uid("u2")];
        let active_candidates = 3; // u4, u5, u7

        for want in 0..5 {
            let picked = pick(&store, &picker, &team, &exclude, want).await.unwrap();

            assert!(picked.len() <= want.min(active_candidates));
            assert!(picked.iter().all(|id| !exclude.contains(id)));
            let unique: HashSet<&UserId> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
        }
    }
}
