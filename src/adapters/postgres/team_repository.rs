//! PostgreSQL implementation of TeamRepository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode, TeamName, UserId};
use crate::domain::team::Team;
use crate::ports::TeamRepository;

use super::errors::{corrupt_row, map_sqlx_error};
use super::store::PostgresTransaction;

impl PostgresTransaction {
    async fn load_member_ids(&mut self, team_name: &str) -> Result<Vec<UserId>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id FROM team_members
            WHERE team_name = $1
            ORDER BY position
            "#,
        )
        .bind(team_name)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("fetch team members", e))?;

        rows.iter()
            .map(|row| parse_user_id(row.get("user_id")))
            .collect()
    }
}

#[async_trait]
impl TeamRepository for PostgresTransaction {
    async fn get_by_name(&mut self, name: &TeamName) -> Result<Team, DomainError> {
        let exists = sqlx::query("SELECT 1 FROM teams WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch team", e))?;

        if exists.is_none() {
            return Err(DomainError::not_found("team", name));
        }

        let member_ids = self.load_member_ids(name.as_str()).await?;
        Ok(Team::reconstitute(name.clone(), member_ids))
    }

    async fn get_by_member_id(&mut self, member_id: &UserId) -> Result<Team, DomainError> {
        let row = sqlx::query("SELECT team_name FROM team_members WHERE user_id = $1")
            .bind(member_id.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch team by member", e))?
            .ok_or_else(|| DomainError::not_found("team with member", member_id))?;

        let name = parse_team_name(row.get("team_name"))?;
        let member_ids = self.load_member_ids(name.as_str()).await?;
        Ok(Team::reconstitute(name, member_ids))
    }

    async fn get_many_by_names(
        &mut self,
        names: &[TeamName],
    ) -> Result<HashMap<TeamName, Team>, DomainError> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let raw: Vec<String> = names.iter().map(|n| n.as_str().to_string()).collect();

        let found = sqlx::query("SELECT name FROM teams WHERE name = ANY($1)")
            .bind(&raw)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch teams", e))?;

        let mut members: HashMap<TeamName, Vec<UserId>> = HashMap::with_capacity(found.len());
        for row in &found {
            members.insert(parse_team_name(row.get("name"))?, Vec::new());
        }

        if let Some(missing) = names.iter().find(|n| !members.contains_key(*n)) {
            return Err(DomainError::not_found("team", missing));
        }

        let rows = sqlx::query(
            r#"
            SELECT team_name, user_id FROM team_members
            WHERE team_name = ANY($1)
            ORDER BY team_name, position
            "#,
        )
        .bind(&raw)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("fetch team members", e))?;

        for row in &rows {
            let name = parse_team_name(row.get("team_name"))?;
            let user_id = parse_user_id(row.get("user_id"))?;
            members.entry(name).or_default().push(user_id);
        }

        Ok(members
            .into_iter()
            .map(|(name, ids)| (name.clone(), Team::reconstitute(name, ids)))
            .collect())
    }

    async fn save(&mut self, team: &Team) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO teams (name) VALUES ($1)")
            .bind(team.name().as_str())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("insert team", e))?;

        if team.member_ids().is_empty() {
            return Ok(());
        }

        let member_ids: Vec<String> = team
            .member_ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO team_members (team_name, user_id, position)
            SELECT $1, m.user_id, m.position
            FROM UNNEST($2::text[]) WITH ORDINALITY AS m(user_id, position)
            "#,
        )
        .bind(team.name().as_str())
        .bind(&member_ids)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            let err = map_sqlx_error("insert team members", e);
            // user_id is UNIQUE across teams
            if err.is(ErrorCode::AlreadyExists) {
                DomainError::new(ErrorCode::MemberInOtherTeam, err.message)
            } else {
                err
            }
        })?;

        Ok(())
    }
}

fn parse_team_name(raw: String) -> Result<TeamName, DomainError> {
    TeamName::new(raw).map_err(|e| corrupt_row("team_name", e))
}

pub(super) fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| corrupt_row("user_id", e))
}
