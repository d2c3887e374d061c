//! Team aggregate entity.

use std::collections::HashSet;

use crate::domain::foundation::{DomainError, ErrorCode, TeamName, UserId};
use serde::{Deserialize, Serialize};

/// Team aggregate - a named set of users reviewers are drawn from.
///
/// # Invariants
///
/// - `name` is non-blank (guaranteed by `TeamName`)
/// - `member_ids` contains no duplicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: TeamName,
    member_ids: Vec<UserId>,
}

impl Team {
    /// Create a team with its initial membership.
    ///
    /// # Errors
    ///
    /// - `DuplicateMember` if a member ID is listed twice
    pub fn new(name: TeamName, member_ids: Vec<UserId>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(member_ids.len());
        for id in &member_ids {
            if !seen.insert(id) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateMember,
                    format!("user {} is listed twice in team {}", id, name),
                )
                .with_detail("user_id", id.as_str()));
            }
        }

        Ok(Self { name, member_ids })
    }

    /// Reconstitute a team from persistence (no validation).
    pub fn reconstitute(name: TeamName, member_ids: Vec<UserId>) -> Self {
        Self { name, member_ids }
    }

    pub fn name(&self) -> &TeamName {
        &self.name
    }

    /// Members in the order they were added.
    pub fn member_ids(&self) -> &[UserId] {
        &self.member_ids
    }

    pub fn has_member(&self, user_id: &UserId) -> bool {
        self.member_ids.contains(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<UserId> {
        raw.iter().map(|s| UserId::new(*s).unwrap()).collect()
    }

    #[test]
    fn new_accepts_unique_members() {
        let team = Team::new(TeamName::new("backend").unwrap(), ids(&["a", "b"])).unwrap();
        assert_eq!(team.member_ids().len(), 2);
        assert!(team.has_member(&UserId::new("a").unwrap()));
    }

    #[test]
    fn new_accepts_empty_membership() {
        let team = Team::new(TeamName::new("empty").unwrap(), vec![]).unwrap();
        assert!(team.member_ids().is_empty());
    }

    #[test]
    fn new_rejects_duplicate_members() {
        let err = Team::new(TeamName::new("backend").unwrap(), ids(&["a", "b", "a"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateMember);
        assert_eq!(err.details.get("user_id"), Some(&"a".to_string()));
    }
}
