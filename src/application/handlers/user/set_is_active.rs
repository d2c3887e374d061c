//! SetIsActiveHandler - Command handler for toggling a user's active flag.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::Store;

use super::view::UserWithTeamView;

/// Command to set a user's active flag.
#[derive(Debug, Clone)]
pub struct SetIsActiveCommand {
    pub user_id: UserId,
    pub active: bool,
}

/// Handler for toggling a single user.
///
/// Unlike deactivation, this leaves existing reviewer assignments alone.
pub struct SetIsActiveHandler {
    store: Arc<dyn Store>,
}

impl SetIsActiveHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SetIsActiveCommand) -> Result<UserWithTeamView, DomainError> {
        let mut tx = self.store.begin().await?;

        let mut user = tx.users().get(&cmd.user_id).await?;
        user.set_active(cmd.active);
        tx.users()
            .save(&user)
            .await
            .map_err(|e| e.context("saving user"))?;

        let team = tx
            .teams()
            .get_by_member_id(user.id())
            .await
            .map_err(|e| e.context("resolving team"))?;
        tx.commit().await?;

        info!(user_id = %user.id(), active = cmd.active, "User activity updated");

        Ok(UserWithTeamView {
            id: user.id().clone(),
            name: user.name().to_string(),
            team_name: team.name().clone(),
            active: user.is_active(),
        })
    }
}
