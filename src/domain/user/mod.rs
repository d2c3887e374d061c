//! User domain module.
//!
//! Users carry identity and an active flag. Only active users are eligible
//! reviewer candidates.

mod account;

pub use account::User;
