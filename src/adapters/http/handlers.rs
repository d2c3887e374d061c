//! HTTP handlers for team, user, and pull request endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;

use crate::application::{
    AddTeamCommand, AddTeamHandler, CreatePullRequestCommand, CreatePullRequestHandler,
    DeactivateUsersCommand, DeactivateUsersHandler, GetReviewHandler, GetReviewQuery,
    GetTeamHandler, GetTeamQuery, MergePullRequestCommand, MergePullRequestHandler,
    ReassignReviewerCommand, ReassignReviewerHandler, ReviewerPicker, SetIsActiveCommand,
    SetIsActiveHandler, TeamMember,
};
use crate::domain::foundation::{PullRequestId, TeamName, UserId};
use crate::ports::Store;

use super::dto::{
    AddTeamRequest, AddTeamResponse, CreatePullRequestRequest, DeactivateUsersRequest,
    DeactivateUsersResponse, GetReviewResponse, MergePullRequestRequest, PullRequestResponse,
    ReassignReviewerRequest, ReassignReviewerResponse, SetIsActiveRequest, SetIsActiveResponse,
    TeamDto, TeamNameQuery, UserIdQuery,
};
use super::error::{ApiError, PR_EXISTS, TEAM_EXISTS};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Application handlers shared by every request.
#[derive(Clone)]
pub struct AppState {
    add_team: Arc<AddTeamHandler>,
    get_team: Arc<GetTeamHandler>,
    set_is_active: Arc<SetIsActiveHandler>,
    get_review: Arc<GetReviewHandler>,
    deactivate_users: Arc<DeactivateUsersHandler>,
    create_pull_request: Arc<CreatePullRequestHandler>,
    merge_pull_request: Arc<MergePullRequestHandler>,
    reassign_reviewer: Arc<ReassignReviewerHandler>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, picker: Arc<dyn ReviewerPicker>) -> Self {
        Self {
            add_team: Arc::new(AddTeamHandler::new(store.clone())),
            get_team: Arc::new(GetTeamHandler::new(store.clone())),
            set_is_active: Arc::new(SetIsActiveHandler::new(store.clone())),
            get_review: Arc::new(GetReviewHandler::new(store.clone())),
            deactivate_users: Arc::new(DeactivateUsersHandler::new(store.clone(), picker.clone())),
            create_pull_request: Arc::new(CreatePullRequestHandler::new(
                store.clone(),
                picker.clone(),
            )),
            merge_pull_request: Arc::new(MergePullRequestHandler::new(store.clone())),
            reassign_reviewer: Arc::new(ReassignReviewerHandler::new(store, picker)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Teams
// ════════════════════════════════════════════════════════════════════════════

/// POST /team/add
pub async fn add_team(
    State(state): State<AppState>,
    payload: Result<Json<AddTeamRequest>, JsonRejection>,
) -> Result<Json<AddTeamResponse>, ApiError> {
    let Json(req) = payload?;

    let members = req
        .members
        .into_iter()
        .map(|m| {
            Ok(TeamMember {
                id: UserId::new(m.user_id)?,
                name: m.username,
                active: m.is_active,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    let cmd = AddTeamCommand {
        name: TeamName::new(req.team_name)?,
        members,
    };

    let view = state
        .add_team
        .handle(cmd)
        .await
        .map_err(|e| ApiError::from_domain(e, TEAM_EXISTS))?;

    Ok(Json(AddTeamResponse { team: view.into() }))
}

/// GET /team/get?team_name=...
pub async fn get_team(
    State(state): State<AppState>,
    query: Result<Query<TeamNameQuery>, QueryRejection>,
) -> Result<Json<TeamDto>, ApiError> {
    let Query(query) = query?;

    let view = state
        .get_team
        .handle(GetTeamQuery {
            name: TeamName::new(query.team_name)?,
        })
        .await
        .map_err(|e| ApiError::from_domain(e, TEAM_EXISTS))?;

    Ok(Json(view.into()))
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

/// POST /users/setIsActive
pub async fn set_is_active(
    State(state): State<AppState>,
    payload: Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> Result<Json<SetIsActiveResponse>, ApiError> {
    let Json(req) = payload?;

    let view = state
        .set_is_active
        .handle(SetIsActiveCommand {
            user_id: UserId::new(req.user_id)?,
            active: req.is_active,
        })
        .await
        .map_err(|e| ApiError::from_domain(e, TEAM_EXISTS))?;

    Ok(Json(SetIsActiveResponse { user: view.into() }))
}

/// GET /users/getReview?user_id=...
pub async fn get_review(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<GetReviewResponse>, ApiError> {
    let Query(query) = query?;
    let user_id = UserId::new(query.user_id)?;

    let reviews = state
        .get_review
        .handle(GetReviewQuery {
            user_id: user_id.clone(),
        })
        .await
        .map_err(|e| ApiError::from_domain(e, PR_EXISTS))?;

    Ok(Json(GetReviewResponse {
        user_id: user_id.to_string(),
        pull_requests: reviews.into_iter().map(Into::into).collect(),
    }))
}

/// POST /users/deactivate
pub async fn deactivate_users(
    State(state): State<AppState>,
    payload: Result<Json<DeactivateUsersRequest>, JsonRejection>,
) -> Result<Json<DeactivateUsersResponse>, ApiError> {
    let Json(req) = payload?;

    let user_ids = req
        .user_ids
        .into_iter()
        .map(UserId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let result = state
        .deactivate_users
        .handle(DeactivateUsersCommand { user_ids })
        .await
        .map_err(|e| ApiError::from_domain(e, PR_EXISTS))?;

    Ok(Json(result.into()))
}

// ════════════════════════════════════════════════════════════════════════════
// Pull requests
// ════════════════════════════════════════════════════════════════════════════

/// POST /pullRequest/create
pub async fn create_pull_request(
    State(state): State<AppState>,
    payload: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> Result<Json<PullRequestResponse>, ApiError> {
    let Json(req) = payload?;

    let cmd = CreatePullRequestCommand {
        id: PullRequestId::new(req.pull_request_id)?,
        name: req.pull_request_name,
        author_id: UserId::new(req.author_id)?,
    };

    let view = state
        .create_pull_request
        .handle(cmd)
        .await
        .map_err(|e| ApiError::from_domain(e, PR_EXISTS))?;

    Ok(Json(PullRequestResponse { pr: view.into() }))
}

/// POST /pullRequest/merge
pub async fn merge_pull_request(
    State(state): State<AppState>,
    payload: Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> Result<Json<PullRequestResponse>, ApiError> {
    let Json(req) = payload?;

    let view = state
        .merge_pull_request
        .handle(MergePullRequestCommand {
            pull_request_id: PullRequestId::new(req.pull_request_id)?,
        })
        .await
        .map_err(|e| ApiError::from_domain(e, PR_EXISTS))?;

    Ok(Json(PullRequestResponse { pr: view.into() }))
}

/// POST /pullRequest/reassign
pub async fn reassign_reviewer(
    State(state): State<AppState>,
    payload: Result<Json<ReassignReviewerRequest>, JsonRejection>,
) -> Result<Json<ReassignReviewerResponse>, ApiError> {
    let Json(req) = payload?;

    let cmd = ReassignReviewerCommand {
        pull_request_id: PullRequestId::new(req.pull_request_id)?,
        old_reviewer_id: UserId::new(req.old_reviewer_id)?,
    };

    let result = state
        .reassign_reviewer
        .handle(cmd)
        .await
        .map_err(|e| ApiError::from_domain(e, PR_EXISTS))?;

    Ok(Json(result.into()))
}
