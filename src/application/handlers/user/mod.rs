//! User command and query handlers.

mod deactivate_users;
mod get_review;
mod set_is_active;
mod view;

pub use deactivate_users::{DeactivateUsersCommand, DeactivateUsersHandler, DeactivateUsersResult};
pub use get_review::{GetReviewHandler, GetReviewQuery};
pub use set_is_active::{SetIsActiveCommand, SetIsActiveHandler};
pub use view::{ReviewedPullRequestView, UserView, UserWithTeamView};
