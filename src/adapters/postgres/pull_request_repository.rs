//! PostgreSQL implementation of PullRequestRepository.
//!
//! Reviewer lists live in `pull_request_reviewers` with an explicit
//! `position`, so the stored order is the assignment order.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, PullRequestId, TeamName, Timestamp, UserId};
use crate::domain::pull_request::{PullRequest, PullRequestStatus};
use crate::ports::{PullRequestRepository, PullRequestWithMatchedReviewers};

use super::errors::{corrupt_row, map_sqlx_error};
use super::store::PostgresTransaction;
use super::team_repository::parse_user_id;

const SELECT_PULL_REQUESTS: &str = r#"
    SELECT p.id, p.name, p.status, p.original_team_name, p.author_id, p.merged_at,
           COALESCE(
               array_agg(r.reviewer_id ORDER BY r.position)
                   FILTER (WHERE r.reviewer_id IS NOT NULL),
               '{}'
           ) AS reviewer_ids
    FROM pull_requests p
    LEFT JOIN pull_request_reviewers r ON r.pull_request_id = p.id
"#;

const GROUP_AND_ORDER: &str = r#"
    GROUP BY p.id, p.name, p.status, p.original_team_name, p.author_id, p.merged_at
    ORDER BY p.id
"#;

impl PostgresTransaction {
    async fn replace_reviewers(&mut self, pull_request: &PullRequest) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM pull_request_reviewers WHERE pull_request_id = $1")
            .bind(pull_request.id().as_str())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("clear reviewers", e))?;

        if pull_request.reviewer_ids().is_empty() {
            return Ok(());
        }

        let reviewer_ids: Vec<String> = pull_request
            .reviewer_ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO pull_request_reviewers (pull_request_id, reviewer_id, position)
            SELECT $1, r.reviewer_id, r.position
            FROM UNNEST($2::text[]) WITH ORDINALITY AS r(reviewer_id, position)
            "#,
        )
        .bind(pull_request.id().as_str())
        .bind(&reviewer_ids)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("insert reviewers", e))?;

        Ok(())
    }
}

#[async_trait]
impl PullRequestRepository for PostgresTransaction {
    async fn get_by_id(&mut self, id: &PullRequestId) -> Result<PullRequest, DomainError> {
        let query = format!("{} WHERE p.id = $1 {}", SELECT_PULL_REQUESTS, GROUP_AND_ORDER);
        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch pull request", e))?
            .ok_or_else(|| DomainError::not_found("pull request", id))?;

        row_to_pull_request(&row)
    }

    async fn get_many_by_reviewer_id(
        &mut self,
        reviewer_id: &UserId,
    ) -> Result<Vec<PullRequest>, DomainError> {
        let query = format!(
            r#"{}
            WHERE p.id IN (
                SELECT pull_request_id FROM pull_request_reviewers WHERE reviewer_id = $1
            )
            {}"#,
            SELECT_PULL_REQUESTS, GROUP_AND_ORDER
        );
        let rows = sqlx::query(&query)
            .bind(reviewer_id.as_str())
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch pull requests by reviewer", e))?;

        rows.iter().map(row_to_pull_request).collect()
    }

    async fn get_all_unmerged_with_any_of_reviewers(
        &mut self,
        reviewer_ids: &[UserId],
    ) -> Result<Vec<PullRequestWithMatchedReviewers>, DomainError> {
        if reviewer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<String> = reviewer_ids.iter().map(|id| id.as_str().to_string()).collect();
        let query = format!(
            r#"{}
            WHERE p.status = 'OPEN'
              AND p.id IN (
                  SELECT pull_request_id FROM pull_request_reviewers
                  WHERE reviewer_id = ANY($1)
              )
            {}"#,
            SELECT_PULL_REQUESTS, GROUP_AND_ORDER
        );
        let rows = sqlx::query(&query)
            .bind(&raw)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("fetch open pull requests by reviewers", e))?;

        let wanted: HashSet<&UserId> = reviewer_ids.iter().collect();
        rows.iter()
            .map(|row| {
                let pull_request = row_to_pull_request(row)?;
                let matched_reviewer_ids = pull_request
                    .reviewer_ids()
                    .iter()
                    .filter(|id| wanted.contains(id))
                    .cloned()
                    .collect();
                Ok(PullRequestWithMatchedReviewers {
                    pull_request,
                    matched_reviewer_ids,
                })
            })
            .collect()
    }

    async fn create(&mut self, pull_request: &PullRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO pull_requests (
                id, name, status, original_team_name, author_id, merged_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(pull_request.id().as_str())
        .bind(pull_request.name())
        .bind(pull_request.status().as_str())
        .bind(pull_request.original_team().as_str())
        .bind(pull_request.author_id().as_str())
        .bind(pull_request.merged_at().map(|t| *t.as_datetime()))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("insert pull request", e))?;

        self.replace_reviewers(pull_request).await
    }

    async fn save(&mut self, pull_request: &PullRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE pull_requests SET
                status = $2,
                merged_at = $3
            WHERE id = $1
            "#,
        )
        .bind(pull_request.id().as_str())
        .bind(pull_request.status().as_str())
        .bind(pull_request.merged_at().map(|t| *t.as_datetime()))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("update pull request", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("pull request", pull_request.id()));
        }

        self.replace_reviewers(pull_request).await
    }

    async fn save_many(&mut self, pull_requests: &[PullRequest]) -> Result<(), DomainError> {
        if pull_requests.is_empty() {
            return Ok(());
        }

        let ids: Vec<String> = pull_requests
            .iter()
            .map(|pr| pr.id().as_str().to_string())
            .collect();
        let statuses: Vec<String> = pull_requests
            .iter()
            .map(|pr| pr.status().as_str().to_string())
            .collect();
        let merged_at: Vec<Option<DateTime<Utc>>> = pull_requests
            .iter()
            .map(|pr| pr.merged_at().map(|t| *t.as_datetime()))
            .collect();

        let updated: Vec<String> = sqlx::query_scalar(
            r#"
            UPDATE pull_requests AS p SET
                status = u.status,
                merged_at = u.merged_at
            FROM UNNEST($1::text[], $2::text[], $3::timestamptz[])
                AS u(id, status, merged_at)
            WHERE p.id = u.id
            RETURNING p.id
            "#,
        )
        .bind(&ids)
        .bind(&statuses)
        .bind(&merged_at)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("update pull requests", e))?;

        if updated.len() != ids.len() {
            let found: HashSet<&str> = updated.iter().map(String::as_str).collect();
            if let Some(missing) = pull_requests
                .iter()
                .find(|pr| !found.contains(pr.id().as_str()))
            {
                return Err(DomainError::not_found("pull request", missing.id()));
            }
        }

        sqlx::query("DELETE FROM pull_request_reviewers WHERE pull_request_id = ANY($1)")
            .bind(&ids)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_sqlx_error("clear reviewers", e))?;

        let rows = ReviewerRows::from_pull_requests(pull_requests);
        if rows.pull_request_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO pull_request_reviewers (pull_request_id, reviewer_id, position)
            SELECT * FROM UNNEST($1::text[], $2::text[], $3::bigint[])
            "#,
        )
        .bind(&rows.pull_request_ids)
        .bind(&rows.reviewer_ids)
        .bind(&rows.positions)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("insert reviewers", e))?;

        Ok(())
    }
}

/// Column arrays for a multi-row insert into `pull_request_reviewers`.
///
/// Positions are 1-based per pull request, matching `WITH ORDINALITY`.
#[derive(Debug, Default, PartialEq)]
struct ReviewerRows {
    pull_request_ids: Vec<String>,
    reviewer_ids: Vec<String>,
    positions: Vec<i64>,
}

impl ReviewerRows {
    fn from_pull_requests(pull_requests: &[PullRequest]) -> Self {
        let mut rows = Self::default();
        for pr in pull_requests {
            for (position, reviewer_id) in (1_i64..).zip(pr.reviewer_ids()) {
                rows.pull_request_ids.push(pr.id().as_str().to_string());
                rows.reviewer_ids.push(reviewer_id.as_str().to_string());
                rows.positions.push(position);
            }
        }
        rows
    }
}

fn row_to_pull_request(row: &PgRow) -> Result<PullRequest, DomainError> {
    let id = PullRequestId::new(row.get::<String, _>("id"))
        .map_err(|e| corrupt_row("pull_requests.id", e))?;
    let status: PullRequestStatus = row
        .get::<String, _>("status")
        .parse()
        .map_err(|e| corrupt_row("pull_requests.status", e))?;
    let original_team = TeamName::new(row.get::<String, _>("original_team_name"))
        .map_err(|e| corrupt_row("pull_requests.original_team_name", e))?;
    let author_id = parse_user_id(row.get("author_id"))?;
    let reviewer_ids = row
        .get::<Vec<String>, _>("reviewer_ids")
        .into_iter()
        .map(parse_user_id)
        .collect::<Result<Vec<_>, _>>()?;
    let merged_at = row
        .get::<Option<DateTime<Utc>>, _>("merged_at")
        .map(Timestamp::from_datetime);

    Ok(PullRequest::reconstitute(
        id,
        row.get("name"),
        status,
        original_team,
        author_id,
        reviewer_ids,
        merged_at,
    ))
}
