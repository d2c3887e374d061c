//! PostgreSQL implementation of UserRepository.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

use super::errors::map_sqlx_error;
use super::store::PostgresTransaction;
use super::team_repository::parse_user_id;

#[async_trait]
impl UserRepository for PostgresTransaction {
    async fn get(&mut self, id: &UserId) -> Result<User, DomainError> {
        let row = sqlx::query("SELECT id, name, is_active FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch user", e))?
            .ok_or_else(|| DomainError::not_found("user", id))?;

        row_to_user(&row)
    }

    async fn get_many(&mut self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let mut seen = HashSet::with_capacity(ids.len());
        let raw: Vec<String> = ids
            .iter()
            .filter(|id| seen.insert(*id))
            .map(|id| id.as_str().to_string())
            .collect();

        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT u.id, u.name, u.is_active
            FROM UNNEST($1::text[]) WITH ORDINALITY AS r(id, ord)
            JOIN users u ON u.id = r.id
            ORDER BY r.ord
            "#,
        )
        .bind(&raw)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("fetch users", e))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn save(&mut self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, is_active) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                is_active = EXCLUDED.is_active
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.is_active())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("save user", e))?;

        Ok(())
    }

    async fn save_many(&mut self, users: &[User]) -> Result<(), DomainError> {
        if users.is_empty() {
            return Ok(());
        }

        let ids: Vec<String> = users.iter().map(|u| u.id().as_str().to_string()).collect();
        let names: Vec<String> = users.iter().map(|u| u.name().to_string()).collect();
        let active: Vec<bool> = users.iter().map(User::is_active).collect();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, is_active)
            SELECT * FROM UNNEST($1::text[], $2::text[], $3::bool[])
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                is_active = EXCLUDED.is_active
            "#,
        )
        .bind(&ids)
        .bind(&names)
        .bind(&active)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("save users", e))?;

        Ok(())
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    Ok(User::reconstitute(
        parse_user_id(row.get("id"))?,
        row.get("name"),
        row.get("is_active"),
    ))
}
