//! Team command and query handlers.

mod add_team;
mod get_team;
mod view;

pub use add_team::{AddTeamCommand, AddTeamHandler, TeamMember};
pub use get_team::{GetTeamHandler, GetTeamQuery};
pub use view::{TeamMemberView, TeamView};
