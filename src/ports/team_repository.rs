//! Team repository port.
//!
//! Repositories are bound to a [`StoreTransaction`](super::StoreTransaction);
//! callers obtain one through `tx.teams()`.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, TeamName, UserId};
use crate::domain::team::Team;
use async_trait::async_trait;

/// Repository port for Team aggregate persistence.
#[async_trait]
pub trait TeamRepository: Send {
    /// Find a team by name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no team has this name
    async fn get_by_name(&mut self, name: &TeamName) -> Result<Team, DomainError>;

    /// Find the team that lists `member_id` among its members.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user belongs to no team
    async fn get_by_member_id(&mut self, member_id: &UserId) -> Result<Team, DomainError>;

    /// Load several teams in one round trip, keyed by name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if any requested name is missing
    async fn get_many_by_names(
        &mut self,
        names: &[TeamName],
    ) -> Result<HashMap<TeamName, Team>, DomainError>;

    /// Persist a new team with its membership.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the team name is taken
    async fn save(&mut self, team: &Team) -> Result<(), DomainError>;
}
