//! Strongly-typed identifier value objects.
//!
//! All identifiers here are assigned by callers, so they wrap strings rather
//! than generated UUIDs. Construction rejects blank values.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

fn non_blank(value: String, field: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}

/// Unique identifier for a user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_blank(id.into(), "user_id")?))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a pull request.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestId(String);

impl PullRequestId {
    /// Creates a new PullRequestId, returning error if blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_blank(id.into(), "pull_request_id")?))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team name, which doubles as the team's identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a new TeamName, returning error if blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(non_blank(name.into(), "team_name")?))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
