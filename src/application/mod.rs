//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
mod reviewer_picker;

pub use handlers::*;
pub use reviewer_picker::{PickReviewersRequest, RandomReviewerPicker, ReviewerPicker};
