//! Team read models.

use serde::Serialize;

use crate::domain::foundation::{TeamName, UserId};
use crate::domain::user::User;

/// A team with its members resolved to user records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamView {
    pub name: TeamName,
    pub members: Vec<TeamMemberView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMemberView {
    pub id: UserId,
    pub name: String,
    pub active: bool,
}

impl From<&User> for TeamMemberView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            active: user.is_active(),
        }
    }
}
