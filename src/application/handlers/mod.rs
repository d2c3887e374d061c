//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler opens exactly one store transaction per call.

pub mod pull_request;
pub mod team;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use pull_request::{
    CreatePullRequestCommand, CreatePullRequestHandler, MergePullRequestCommand,
    MergePullRequestHandler, ReassignReviewerCommand, ReassignReviewerHandler,
    ReassignReviewerResult,
};
pub use team::{
    AddTeamCommand, AddTeamHandler, GetTeamHandler, GetTeamQuery, TeamMember, TeamMemberView,
    TeamView,
};
pub use user::{
    DeactivateUsersCommand, DeactivateUsersHandler, DeactivateUsersResult, GetReviewHandler,
    GetReviewQuery, ReviewedPullRequestView, SetIsActiveCommand, SetIsActiveHandler, UserView,
    UserWithTeamView,
};
