//! Translation of domain errors into HTTP responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::dto::{ErrorBody, ErrorResponse};

pub const TEAM_EXISTS: &str = "TEAM_EXISTS";
pub const PR_EXISTS: &str = "PR_EXISTS";

/// An error ready to be written to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    /// Map a domain error. `exists_code` names the conflict reported for
    /// `AlreadyExists`, which depends on the endpoint.
    pub fn from_domain(err: DomainError, exists_code: &'static str) -> Self {
        let (status, code) = match err.code {
            ErrorCode::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorCode::AlreadyExists => (StatusCode::CONFLICT, exists_code),
            ErrorCode::MemberInOtherTeam => (StatusCode::CONFLICT, "MEMBER_IN_OTHER_TEAM"),
            ErrorCode::ModifyMergedPr => (StatusCode::CONFLICT, "PR_MERGED"),
            ErrorCode::NotPreviouslyAssigned => (StatusCode::CONFLICT, "NOT_ASSIGNED"),
            ErrorCode::NoCandidate => (StatusCode::CONFLICT, "NO_CANDIDATE"),
            code if code.is_validation() => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            _ => {
                error!(error = %err, "Request failed");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_ERROR",
                    message: "internal server error".to_string(),
                };
            }
        };

        Self {
            status,
            code,
            message: err.message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(code: ErrorCode) -> StatusCode {
        ApiError::from_domain(DomainError::new(code, "boom"), PR_EXISTS).status()
    }

    #[test]
    fn business_conflicts_map_to_409() {
        assert_eq!(status_of(ErrorCode::AlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorCode::ModifyMergedPr), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorCode::NotPreviouslyAssigned), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorCode::NoCandidate), StatusCode::CONFLICT);
        assert_eq!(status_of(ErrorCode::MemberInOtherTeam), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(status_of(ErrorCode::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(status_of(ErrorCode::InvalidName), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::InvalidId), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::DuplicateMember), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_errors_hide_details() {
        let err = ApiError::from_domain(DomainError::database("connection reset"), TEAM_EXISTS);

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "internal server error");
    }

    #[test]
    fn member_conflict_is_not_reported_as_team_exists() {
        let err = ApiError::from_domain(
            DomainError::new(ErrorCode::MemberInOtherTeam, "user b already belongs to another team"),
            TEAM_EXISTS,
        );
        assert_eq!(err.code, "MEMBER_IN_OTHER_TEAM");
    }

    #[test]
    fn already_exists_uses_endpoint_code() {
        let err = ApiError::from_domain(DomainError::already_exists("team", "backend"), TEAM_EXISTS);
        assert_eq!(err.code, TEAM_EXISTS);
    }
}
