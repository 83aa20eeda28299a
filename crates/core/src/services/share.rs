//! Share service.

use action_common::{AppError, AppResult, Pagination};
use action_db::entities::{TargetType, share};
use action_db::repositories::ShareRepository;
use serde::Serialize;

/// Share service for business logic.
#[derive(Clone)]
pub struct ShareService {
    share_repo: ShareRepository,
}

/// External shape of a share record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareItem {
    pub id: String,
    pub target_id: String,
    pub target_type: i32,
    pub user_id: String,
    /// Seconds since the Unix epoch.
    pub created_at: i64,
}

impl From<share::Model> for ShareItem {
    fn from(record: share::Model) -> Self {
        Self {
            id: record.id,
            target_id: record.target_id,
            target_type: record.target_type as i32,
            user_id: record.user_id,
            created_at: record.created_at.timestamp(),
        }
    }
}

impl ShareService {
    /// Create a new share service.
    #[must_use]
    pub const fn new(share_repo: ShareRepository) -> Self {
        Self { share_repo }
    }

    /// Share a target.
    ///
    /// No precondition: repeated shares by the same user each insert a new
    /// record.
    pub async fn share(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        if let Err(e) = self
            .share_repo
            .create(target_id, target_type, user_id)
            .await
        {
            tracing::warn!(error = %e, target_id = %target_id, user_id = %user_id, "Share creation failed");
            return Err(AppError::OperationFailed);
        }

        Ok(())
    }

    /// Whether the user has shared the target at least once.
    pub async fn is_shared(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<bool> {
        self.share_repo
            .is_shared(target_id, target_type, user_id)
            .await
    }

    /// Number of share records for a target.
    pub async fn count_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<u64> {
        self.share_repo.count_by_target(target_id, target_type).await
    }

    /// Number of share records by a user.
    pub async fn count_by_user(&self, target_type: TargetType, user_id: &str) -> AppResult<u64> {
        self.share_repo.count_by_user(target_type, user_id).await
    }

    /// Page of shares for a target, newest first.
    pub async fn list_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
        pagination: &Pagination,
    ) -> AppResult<(Vec<ShareItem>, u64)> {
        let (records, total) = self
            .share_repo
            .find_by_target(target_id, target_type, pagination)
            .await?;

        Ok((records.into_iter().map(ShareItem::from).collect(), total))
    }

    /// Page of shares by a user, newest first.
    pub async fn list_by_user(
        &self,
        target_type: TargetType,
        user_id: &str,
        pagination: &Pagination,
    ) -> AppResult<(Vec<ShareItem>, u64)> {
        let (records, total) = self
            .share_repo
            .find_by_user(target_type, user_id, pagination)
            .await?;

        Ok((records.into_iter().map(ShareItem::from).collect(), total))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_share(id: &str, target_id: &str, user_id: &str) -> share::Model {
        share::Model {
            id: id.to_string(),
            target_id: target_id.to_string(),
            target_type: TargetType::Post,
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_share_has_no_precondition() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let service = ShareService::new(ShareRepository::new(db));

        // Three shares of the same triple, three successes.
        for _ in 0..3 {
            service.share("t1", TargetType::Post, "u1").await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_is_shared_reports_found_directly() {
        let record = create_test_share("s1", "t1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![record], Vec::<share::Model>::new()])
                .into_connection(),
        );

        let service = ShareService::new(ShareRepository::new(db));

        assert!(service.is_shared("t1", TargetType::Post, "u1").await.unwrap());
        assert!(!service.is_shared("t1", TargetType::Post, "u2").await.unwrap());
    }

    #[test]
    fn test_item_projection_uses_epoch_seconds() {
        let record = create_test_share("s1", "t1", "u1");
        let expected = record.created_at.timestamp();

        let item = ShareItem::from(record);

        assert_eq!(item.id, "s1");
        assert_eq!(item.created_at, expected);
    }
}
