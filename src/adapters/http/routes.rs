//! Route configuration.
//!
//! Routes:
//! - `POST /team/add` - Create a team and upsert its members
//! - `GET /team/get?team_name=` - Team with member details
//! - `POST /users/setIsActive` - Toggle one user's active flag
//! - `GET /users/getReview?user_id=` - Pull requests a user reviews
//! - `POST /users/deactivate` - Bulk deactivation with reviewer cascade
//! - `POST /pullRequest/create` - Open a pull request with auto-assigned reviewers
//! - `POST /pullRequest/merge` - Merge a pull request (idempotent)
//! - `POST /pullRequest/reassign` - Replace one reviewer

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_team, create_pull_request, deactivate_users, get_review, get_team, merge_pull_request,
    reassign_reviewer, set_is_active, AppState,
};

/// Creates the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/team/add", post(add_team))
        .route("/team/get", get(get_team))
        .route("/users/setIsActive", post(set_is_active))
        .route("/users/getReview", get(get_review))
        .route("/users/deactivate", post(deactivate_users))
        .route("/pullRequest/create", post(create_pull_request))
        .route("/pullRequest/merge", post(merge_pull_request))
        .route("/pullRequest/reassign", post(reassign_reviewer))
}

/// Full application: routes, state, and the HTTP middleware stack.
///
/// A request that outlives `request_timeout` is answered with 408 and its
/// handler future is dropped, which rolls back any open transaction.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    api_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::adapters::random::ScriptedRandomSource;
    use crate::application::RandomReviewerPicker;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store = Arc::new(InMemoryStore::new());
        let picker = Arc::new(RandomReviewerPicker::new(Arc::new(
            ScriptedRandomSource::first(),
        )));
        app(AppState::new(store, picker), Duration::from_secs(5))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn add_backend_team(app: &Router) {
        let (status, _) = send(
            app,
            "POST",
            "/team/add",
            Some(json!({
                "team_name": "backend",
                "members": [
                    {"user_id": "a", "username": "Alice", "is_active": true},
                    {"user_id": "b", "username": "Bob", "is_active": true},
                    {"user_id": "c", "username": "Carol", "is_active": true}
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn team_round_trip_through_http() {
        let app = test_app();
        add_backend_team(&app).await;

        let (status, body) = send(&app, "GET", "/team/get?team_name=backend", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team_name"], "backend");
        assert_eq!(body["members"][1]["username"], "Bob");
    }

    #[tokio::test]
    async fn duplicate_team_reports_team_exists() {
        let app = test_app();
        add_backend_team(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/team/add",
            Some(json!({"team_name": "backend", "members": []})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "TEAM_EXISTS");
    }

    #[tokio::test]
    async fn member_of_another_team_is_its_own_conflict() {
        let app = test_app();
        add_backend_team(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/team/add",
            Some(json!({
                "team_name": "frontend",
                "members": [{"user_id": "b", "username": "Bob", "is_active": true}]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "MEMBER_IN_OTHER_TEAM");

        let (status, _) = send(&app, "GET", "/team/get?team_name=frontend", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_merge_and_reassign_flow() {
        let app = test_app();
        add_backend_team(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/pullRequest/create",
            Some(json!({"pull_request_id": "pr-1", "pull_request_name": "Search", "author_id": "a"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pr"]["assigned_reviewers"], json!(["b", "c"]));
        assert_eq!(body["pr"]["status"], "OPEN");

        let (status, body) = send(
            &app,
            "POST",
            "/pullRequest/create",
            Some(json!({"pull_request_id": "pr-1", "pull_request_name": "Again", "author_id": "a"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "PR_EXISTS");

        let (status, body) = send(
            &app,
            "POST",
            "/pullRequest/reassign",
            Some(json!({"pull_request_id": "pr-1", "old_reviewer_id": "b"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NO_CANDIDATE");

        let (status, body) = send(
            &app,
            "POST",
            "/pullRequest/merge",
            Some(json!({"pull_request_id": "pr-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["pr"]["mergedAt"].is_string());

        let (status, body) = send(
            &app,
            "POST",
            "/pullRequest/reassign",
            Some(json!({"pull_request_id": "pr-1", "old_reviewer_id": "b"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "PR_MERGED");
    }

    #[tokio::test]
    async fn deactivation_cascades_through_http() {
        let app = test_app();
        add_backend_team(&app).await;
        send(
            &app,
            "POST",
            "/pullRequest/create",
            Some(json!({"pull_request_id": "pr-1", "pull_request_name": "Search", "author_id": "a"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/users/deactivate",
            Some(json!({"user_ids": ["b"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["users"][0]["is_active"], false);
        assert_eq!(body["reassigned_pull_requests"], json!(["pr-1"]));

        let (status, body) = send(&app, "GET", "/users/getReview?user_id=b", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pull_requests"], json!([]));
    }

    #[tokio::test]
    async fn unknown_entities_map_to_404() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/team/get?team_name=ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(
            &app,
            "POST",
            "/users/setIsActive",
            Some(json!({"user_id": "ghost", "is_active": false})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_requests_map_to_400() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/pullRequest/merge", Some(json!({"nope": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (status, _) = send(&app, "GET", "/team/get", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/users/deactivate", Some(json!({"user_ids": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/pullRequest/merge",
            Some(json!({"pull_request_id": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
