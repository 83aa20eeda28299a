//! Like service.
//!
//! Same transition policy as follows: reject duplicate activation, allow
//! reactivation of a cancelled record.

use action_common::{AppError, AppResult, Pagination};
use action_db::entities::{TargetType, like};
use action_db::repositories::{LikeRepository, ToggleState};
use serde::Serialize;

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
}

/// External shape of a like record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeItem {
    pub id: String,
    pub target_id: String,
    pub target_type: i32,
    pub user_id: String,
    /// Seconds since the Unix epoch.
    pub created_at: i64,
}

impl From<like::Model> for LikeItem {
    fn from(record: like::Model) -> Self {
        Self {
            id: record.id,
            target_id: record.target_id,
            target_type: record.target_type as i32,
            user_id: record.user_id,
            created_at: record.created_at.timestamp(),
        }
    }
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub const fn new(like_repo: LikeRepository) -> Self {
        Self { like_repo }
    }

    /// Like a target.
    pub async fn like(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        let state = self
            .like_repo
            .toggle_state(target_id, target_type, user_id)
            .await?;

        if state.is_active() {
            return Err(AppError::AlreadyActive("like".to_string()));
        }

        if let Err(e) = self
            .like_repo
            .activate(target_id, target_type, user_id)
            .await
        {
            tracing::warn!(error = %e, target_id = %target_id, user_id = %user_id, "Like activation failed");
            return Err(AppError::OperationFailed);
        }

        Ok(())
    }

    /// Cancel a like.
    ///
    /// A triple that was never liked is an idempotent success; a like that
    /// exists but is already cancelled is rejected.
    pub async fn unlike(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        match self
            .like_repo
            .toggle_state(target_id, target_type, user_id)
            .await?
        {
            ToggleState::Absent => Ok(()),
            ToggleState::Cancelled => Err(AppError::NotActive("like".to_string())),
            ToggleState::Active => {
                if let Err(e) = self.like_repo.cancel(target_id, target_type, user_id).await {
                    tracing::warn!(error = %e, target_id = %target_id, user_id = %user_id, "Like cancellation failed");
                    return Err(AppError::OperationFailed);
                }
                Ok(())
            }
        }
    }

    /// Toggle state of a like for a key triple.
    pub async fn like_state(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<ToggleState> {
        self.like_repo
            .toggle_state(target_id, target_type, user_id)
            .await
    }

    /// Number of like records for a target.
    pub async fn count_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<u64> {
        self.like_repo.count_by_target(target_id, target_type).await
    }

    /// Number of like records by a user.
    pub async fn count_by_user(&self, target_type: TargetType, user_id: &str) -> AppResult<u64> {
        self.like_repo.count_by_user(target_type, user_id).await
    }

    /// Page of likes for a target, newest first.
    pub async fn list_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
        pagination: &Pagination,
    ) -> AppResult<(Vec<LikeItem>, u64)> {
        let (records, total) = self
            .like_repo
            .find_by_target(target_id, target_type, pagination)
            .await?;

        Ok((records.into_iter().map(LikeItem::from).collect(), total))
    }

    /// Page of likes by a user, newest first.
    pub async fn list_by_user(
        &self,
        target_type: TargetType,
        user_id: &str,
        pagination: &Pagination,
    ) -> AppResult<(Vec<LikeItem>, u64)> {
        let (records, total) = self
            .like_repo
            .find_by_user(target_type, user_id, pagination)
            .await?;

        Ok((records.into_iter().map(LikeItem::from).collect(), total))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_like(id: &str, target_id: &str, user_id: &str, is_cancel: bool) -> like::Model {
        like::Model {
            id: id.to_string(),
            target_id: target_id.to_string(),
            target_type: TargetType::Post,
            user_id: user_id.to_string(),
            is_cancel,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_like_already_active_returns_error() {
        let record = create_test_like("l1", "t1", "u1", false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[record]])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(db));
        let result = service.like("t1", TargetType::Post, "u1").await;

        match result {
            Err(AppError::AlreadyActive(kind)) => assert_eq!(kind, "like"),
            other => panic!("Expected AlreadyActive error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_like_never_seen_activates() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new(), Vec::<like::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(db));
        let result = service.like("t1", TargetType::Post, "u1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unlike_never_liked_is_ok() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(db));
        let result = service.unlike("t1", TargetType::Post, "u1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unlike_cancelled_returns_not_active() {
        let cancelled = create_test_like("l1", "t1", "u1", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[cancelled]])
                .into_connection(),
        );

        let service = LikeService::new(LikeRepository::new(db));
        let result = service.unlike("t1", TargetType::Post, "u1").await;

        assert!(matches!(result, Err(AppError::NotActive(_))));
    }

    #[test]
    fn test_item_projection_uses_epoch_seconds() {
        let record = create_test_like("l1", "t1", "u1", false);
        let expected = record.created_at.timestamp();

        let item = LikeItem::from(record);

        assert_eq!(item.id, "l1");
        assert_eq!(item.created_at, expected);
    }
}
