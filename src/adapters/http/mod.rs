//! HTTP adapter - REST API over the application handlers.

mod dto;
mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::{api_router, app};
