//! MergePullRequestHandler - Command handler for merging pull requests.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, PullRequestId};
use crate::domain::pull_request::PullRequestView;
use crate::ports::Store;

/// Command to merge a pull request.
#[derive(Debug, Clone)]
pub struct MergePullRequestCommand {
    pub pull_request_id: PullRequestId,
}

/// Handler for merging pull requests. Merging twice is harmless.
pub struct MergePullRequestHandler {
    store: Arc<dyn Store>,
}

impl MergePullRequestHandler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: MergePullRequestCommand) -> Result<PullRequestView, DomainError> {
        let mut tx = self.store.begin().await?;

        let mut pull_request = tx
            .pull_requests()
            .get_by_id(&cmd.pull_request_id)
            .await
            .map_err(|e| e.context("retrieving pull request"))?;

        pull_request.merge();

        tx.pull_requests()
            .save(&pull_request)
            .await
            .map_err(|e| e.context("saving pull request"))?;
        tx.commit().await?;

        info!(pull_request_id = %pull_request.id(), "Pull request merged");

        Ok(pull_request.to_view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::pull_request::PullRequestStatus;

    #[tokio::test]
    async fn merges_open_pull_request() {
        let store = InMemoryStore::new();
        seed_pull_request(&store, "pr-1", "a", "backend", &["b"]).await;
        let handler = MergePullRequestHandler::new(Arc::new(store.clone()));

        let view = handler
            .handle(MergePullRequestCommand { pull_request_id: prid("pr-1") })
            .await
            .unwrap();

        assert_eq!(view.status, PullRequestStatus::Merged);
        assert!(view.merged_at.is_some());
        assert_eq!(view.reviewer_ids, vec![uid("b")]);
        assert!(store.pull_request(&prid("pr-1")).await.unwrap().is_merged());
    }

    #[tokio::test]
    async fn second_merge_keeps_original_timestamp() {
        let store = InMemoryStore::new();
        seed_pull_request(&store, "pr-1", "a", "backend", &[]).await;
        let handler = MergePullRequestHandler::new(Arc::new(store));
        let cmd = MergePullRequestCommand { pull_request_id: prid("pr-1") };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert_eq!(first.merged_at, second.merged_at);
    }

    #[tokio::test]
    async fn fails_for_unknown_pull_request() {
        let store = InMemoryStore::new();
        let handler = MergePullRequestHandler::new(Arc::new(store));

        let err = handler
            .handle(MergePullRequestCommand { pull_request_id: prid("missing") })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
