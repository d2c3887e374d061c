//! PullRequestStatus enum for tracking the merge lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle status of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    #[default]
    Open,
    Merged,
}

impl PullRequestStatus {
    /// Returns true if reviewers may still change.
    pub fn is_mutable(&self) -> bool {
        matches!(self, PullRequestStatus::Open)
    }

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestStatus::Open => "OPEN",
            PullRequestStatus::Merged => "MERGED",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PullRequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(PullRequestStatus::Open),
            "MERGED" => Ok(PullRequestStatus::Merged),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown pull request status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_open() {
        assert_eq!(PullRequestStatus::default(), PullRequestStatus::Open);
    }

    #[test]
    fn only_open_is_mutable() {
        assert!(PullRequestStatus::Open.is_mutable());
        assert!(!PullRequestStatus::Merged.is_mutable());
    }

    #[test]
    fn parses_storage_representation() {
        assert_eq!("MERGED".parse::<PullRequestStatus>().unwrap(), PullRequestStatus::Merged);
        assert!("merged".parse::<PullRequestStatus>().is_err());
    }

    #[test]
    fn serializes_uppercase() {
        let json = serde_json::to_string(&PullRequestStatus::Open).unwrap();
        assert_eq!(json, "\"OPEN\"");
    }
}
