//! AddTeamHandler - Command handler for registering a team with its members.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, TeamName, UserId};
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::ports::Store;

use super::view::{TeamMemberView, TeamView};

/// A member as supplied when a team is added.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: UserId,
    pub name: String,
    pub active: bool,
}

/// Command to add a team.
#[derive(Debug, Clone)]
pub struct AddTeamCommand {
    pub name: TeamName,
    pub members: Vec<TeamMember>,
}

/// Handler for adding teams.
///
/// Member users are created or updated alongside the team, in the same
/// transaction.
pub struct AddTeamHandler {
    store: Arc<dyn Store>,
}

impl AddTeamHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: AddTeamCommand) -> Result<TeamView, DomainError> {
        // Validate everything before touching the store
        let team = Team::new(
            cmd.name.clone(),
            cmd.members.iter().map(|m| m.id.clone()).collect(),
        )?;
        let users = cmd
            .members
            .into_iter()
            .map(|m| User::new(m.id, m.name, m.active))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.store.begin().await?;

        tx.users()
            .save_many(&users)
            .await
            .map_err(|e| e.context("saving members"))?;
        tx.teams()
            .save(&team)
            .await
            .map_err(|e| e.context("saving team"))?;
        tx.commit().await?;

        info!(team = %team.name(), members = users.len(), "Team added");

        Ok(TeamView {
            name: cmd.name,
            members: users.iter().map(TeamMemberView::from).collect(),
        })
    }
}
