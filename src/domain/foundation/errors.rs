//! Error types for the domain layer.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } => field,
            ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error kinds surfaced by the reviewer engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // General
    NotFound,
    AlreadyExists,

    // Team membership
    MemberInOtherTeam,

    // Pull request invariants
    ModifyMergedPr,
    NotPreviouslyAssigned,
    NoCandidate,
    TooManyReviewers,
    CandidateAlreadyReviewer,

    // Validation
    InvalidName,
    InvalidId,
    DuplicateMember,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// True for codes produced by value validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorCode::InvalidName | ErrorCode::InvalidId | ErrorCode::DuplicateMember
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::MemberInOtherTeam => "MEMBER_IN_OTHER_TEAM",
            ErrorCode::ModifyMergedPr => "PR_MERGED",
            ErrorCode::NotPreviouslyAssigned => "NOT_ASSIGNED",
            ErrorCode::NoCandidate => "NO_CANDIDATE",
            ErrorCode::TooManyReviewers => "TOO_MANY_REVIEWERS",
            ErrorCode::CandidateAlreadyReviewer => "CANDIDATE_ALREADY_REVIEWER",
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::DuplicateMember => "DUPLICATE_MEMBER",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// The code is the contract: wrapping an error with [`DomainError::context`]
/// changes the message only, so callers can always branch on `code`.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a not-found error for an entity.
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            .with_detail("entity", entity)
    }

    /// Creates an already-exists error for an entity.
    pub fn already_exists(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::AlreadyExists,
            format!("{} already exists: {}", entity, id),
        )
        .with_detail("entity", entity)
    }

    /// Creates a database error from any adapter failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Prefixes the message with the failing operation, keeping the code.
    pub fn context(mut self, operation: &str) -> Self {
        self.message = format!("{}: {}", operation, self.message);
        self
    }

    /// Checks the error kind.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = if err.field().ends_with("id") {
            ErrorCode::InvalidId
        } else {
            ErrorCode::InvalidName
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}
