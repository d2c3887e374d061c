//! Mapping from sqlx failures to domain error codes.

use crate::domain::foundation::{DomainError, ErrorCode};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const SERIALIZATION_FAILURE: &str = "40001";

/// Translate a sqlx error raised while performing `operation`.
///
/// Constraint violations keep their business meaning: a duplicate key is
/// `AlreadyExists` and a dangling reference is `NotFound`.
pub(super) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::new(
            ErrorCode::NotFound,
            format!("Failed to {}: row not found", operation),
        ),
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some(UNIQUE_VIOLATION) => DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Failed to {}: {}", operation, db.message()),
            ),
            Some(FOREIGN_KEY_VIOLATION) => DomainError::new(
                ErrorCode::NotFound,
                format!("Failed to {}: {}", operation, db.message()),
            ),
            Some(SERIALIZATION_FAILURE) => {
                DomainError::database(format!("Failed to {}: concurrent update", operation))
                    .with_detail("retryable", "true")
            }
            _ => DomainError::database(format!("Failed to {}: {}", operation, err)),
        },
        _ => DomainError::database(format!("Failed to {}: {}", operation, err)),
    }
}

/// A stored value that no longer passes domain validation.
pub(super) fn corrupt_row(column: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Corrupt value in column {}: {}", column, reason),
    )
}
