//! GetTeamHandler - Query handler for a team and its members.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, TeamName};
use crate::ports::Store;

use super::view::{TeamMemberView, TeamView};

/// Query for a single team.
#[derive(Debug, Clone)]
pub struct GetTeamQuery {
    pub name: TeamName,
}

pub struct GetTeamHandler {
    store: Arc<dyn Store>,
}

impl GetTeamHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetTeamQuery) -> Result<TeamView, DomainError> {
        let mut tx = self.store.begin().await?;

        let team = tx.teams().get_by_name(&query.name).await?;
        let members = tx
            .users()
            .get_many(team.member_ids())
            .await
            .map_err(|e| e.context("retrieving members"))?;

        Ok(TeamView {
            name: team.name().clone(),
            members: members.iter().map(TeamMemberView::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn returns_members_in_membership_order() {
        let store = InMemoryStore::new();
        seed_team(&store, "backend", &[("c", true), ("a", false), ("b", true)]).await;
        let handler = GetTeamHandler::new(Arc::new(store));

        let view = handler
            .handle(GetTeamQuery { name: team_name("backend") })
            .await
            .unwrap();

        let ids: Vec<&str> = view.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(!view.members[1].active);
    }

    #[tokio::test]
    async fn fails_for_unknown_team() {
        let store = InMemoryStore::new();
        let handler = GetTeamHandler::new(Arc::new(store));

        let err = handler
            .handle(GetTeamQuery { name: team_name("ghost") })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
