//! User aggregate entity.

use crate::domain::foundation::{DomainError, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// A user who can author and review pull requests.
///
/// Team membership is not stored here; it is resolved through the team
/// repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    active: bool,
}

impl User {
    /// Create a user.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if name is blank
    pub fn new(id: UserId, name: impl Into<String>, active: bool) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("username").into());
        }

        Ok(Self { id, name, active })
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(id: UserId, name: String, active: bool) -> Self {
        Self { id, name, active }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn new_rejects_blank_name() {
        let err = User::new(UserId::new("u1").unwrap(), " ", true).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidName);
    }

    #[test]
    fn set_active_toggles_flag() {
        let mut user = User::new(UserId::new("u1").unwrap(), "Alice", true).unwrap();
        user.set_active(false);
        assert!(!user.is_active());
    }
}
