//! GetReviewHandler - Query handler for the pull requests a user reviews.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::Store;

use super::view::ReviewedPullRequestView;

#[derive(Debug, Clone)]
pub struct GetReviewQuery {
    pub user_id: UserId,
}

pub struct GetReviewHandler {
    store: Arc<dyn Store>,
}

impl GetReviewHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Pull requests of any status listing the user as a reviewer.
    ///
    /// An unknown user simply has nothing to review.
    pub async fn handle(
        &self,
        query: GetReviewQuery,
    ) -> Result<Vec<ReviewedPullRequestView>, DomainError> {
        let mut tx = self.store.begin().await?;

        let pull_requests = tx
            .pull_requests()
            .get_many_by_reviewer_id(&query.user_id)
            .await
            .map_err(|e| e.context("retrieving reviews"))?;

        Ok(pull_requests.iter().map(ReviewedPullRequestView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::*;

    #[tokio::test]
    async fn lists_only_pull_requests_reviewed_by_user() {
        let store = InMemoryStore::new();
        seed_pull_request(&store, "pr-1", "a", "backend", &["b"]).await;
        seed_pull_request(&store, "pr-2", "a", "backend", &["c"]).await;
        seed_pull_request(&store, "pr-3", "c", "backend", &["b", "a"]).await;
        let handler = GetReviewHandler::new(Arc::new(store));

        let reviews = handler
            .handle(GetReviewQuery { user_id: uid("b") })
            .await
            .unwrap();

        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["pr-1", "pr-3"]);
        assert_eq!(reviews[1].author_id, uid("c"));
    }

    #[tokio::test]
    async fn unknown_user_has_no_reviews() {
        let store = InMemoryStore::new();
        let handler = GetReviewHandler::new(Arc::new(store));

        let reviews = handler
            .handle(GetReviewQuery { user_id: uid("ghost") })
            .await
            .unwrap();

        assert!(reviews.is_empty());
    }
}
