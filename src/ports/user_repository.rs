//! User repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send {
    /// Find a user by ID.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user doesn't exist
    async fn get(&mut self, id: &UserId) -> Result<User, DomainError>;

    /// Load several users in one round trip.
    ///
    /// Returns only users that exist, in the order their IDs were requested.
    async fn get_many(&mut self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Insert or update a user.
    async fn save(&mut self, user: &User) -> Result<(), DomainError>;

    /// Insert or update several users in one round trip.
    async fn save_many(&mut self, users: &[User]) -> Result<(), DomainError>;
}
