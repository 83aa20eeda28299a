//! Share repository.
//!
//! Shares are one-shot: there is no toggle state, no cancel path, and no
//! upsert. Every create inserts a fresh row, so repeated shares by the
//! same user are distinct records and counted individually.

use std::sync::Arc;

use crate::cache::ActionCache;
use crate::entities::{Share, TargetType, share};
use action_common::{AppError, AppResult, IdGenerator, Pagination};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

const KIND: &str = "share";

/// Share repository, sole owner of share rows and the cache entries that
/// shadow single-record lookups.
#[derive(Clone)]
pub struct ShareRepository {
    db: Arc<DatabaseConnection>,
    cache: Option<ActionCache>,
    id_gen: IdGenerator,
}

impl ShareRepository {
    /// Create a new share repository without a cache.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            cache: None,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new share repository whose single-record lookups go through
    /// Redis.
    #[must_use]
    pub const fn with_cache(db: Arc<DatabaseConnection>, cache: ActionCache) -> Self {
        Self {
            db,
            cache: Some(cache),
            id_gen: IdGenerator::new(),
        }
    }

    /// Record a share for a key triple.
    ///
    /// Always inserts: no existence check and no update path.
    pub async fn create(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        let record = share::Model {
            id: self.id_gen.generate(),
            target_id: target_id.to_string(),
            target_type,
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        };

        Share::insert(share::ActiveModel {
            id: Set(record.id.clone()),
            target_id: Set(record.target_id.clone()),
            target_type: Set(record.target_type),
            user_id: Set(record.user_id.clone()),
            created_at: Set(record.created_at),
        })
        .exec_without_returning(self.db.as_ref())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.prime_record(&record).await;

        Ok(())
    }

    /// Whether the user has shared the target at least once.
    ///
    /// Uncached lookup; found means shared, not-found means not shared.
    /// There is no toggle flag involved.
    pub async fn is_shared(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<bool> {
        let found = Share::find()
            .filter(share::Column::TargetId.eq(target_id))
            .filter(share::Column::TargetType.eq(target_type))
            .filter(share::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(found.is_some())
    }

    /// Point lookup by record id, served cache-aside from the record key
    /// space primed on insert.
    pub async fn find_by_id(&self, target_id: &str, id: &str) -> AppResult<Option<share::Model>> {
        if let Some(cache) = &self.cache {
            let key = cache.record_key_for(KIND, target_id, id);
            match cache.get::<share::Model>(&key).await {
                Ok(Some(record)) => return Ok(Some(record)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Share cache read failed, falling back to database");
                }
            }

            let found = self.find_by_id_uncached(id).await?;
            if let Some(record) = &found
                && let Err(e) = cache.set(&key, record).await
            {
                tracing::warn!(error = %e, "Share cache write failed");
            }
            return Ok(found);
        }

        self.find_by_id_uncached(id).await
    }

    /// Count share rows for a target.
    pub async fn count_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<u64> {
        Share::find()
            .filter(share::Column::TargetId.eq(target_id))
            .filter(share::Column::TargetType.eq(target_type))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count share rows by a user.
    pub async fn count_by_user(&self, target_type: TargetType, user_id: &str) -> AppResult<u64> {
        Share::find()
            .filter(share::Column::TargetType.eq(target_type))
            .filter(share::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Page of shares for a target, newest first, with the unpaginated
    /// total.
    pub async fn find_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
        pagination: &Pagination,
    ) -> AppResult<(Vec<share::Model>, u64)> {
        let records = Share::find()
            .filter(share::Column::TargetId.eq(target_id))
            .filter(share::Column::TargetType.eq(target_type))
            .order_by_desc(share::Column::CreatedAt)
            // id breaks ties between equal timestamps
            .order_by_desc(share::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let total = self.count_by_target(target_id, target_type).await?;

        Ok((records, total))
    }

    /// Page of shares by a user, newest first, with the unpaginated total.
    pub async fn find_by_user(
        &self,
        target_type: TargetType,
        user_id: &str,
        pagination: &Pagination,
    ) -> AppResult<(Vec<share::Model>, u64)> {
        let records = Share::find()
            .filter(share::Column::TargetType.eq(target_type))
            .filter(share::Column::UserId.eq(user_id))
            .order_by_desc(share::Column::CreatedAt)
            .order_by_desc(share::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let total = self.count_by_user(target_type, user_id).await?;

        Ok((records, total))
    }

    async fn find_by_id_uncached(&self, id: &str) -> AppResult<Option<share::Model>> {
        Share::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Prime the record key space for a freshly inserted record.
    async fn prime_record(&self, record: &share::Model) {
        if let Some(cache) = &self.cache {
            let key = cache.record_key_for(KIND, &record.target_id, &record.id);
            if let Err(e) = cache.set(&key, record).await {
                tracing::warn!(error = %e, "Share cache write failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

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
    async fn test_create_always_inserts() {
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
                ])
                .into_connection(),
        );

        let repo = ShareRepository::new(db);

        // No existence check: the same triple inserts twice without error.
        repo.create("t1", TargetType::Post, "u1").await.unwrap();
        repo.create("t1", TargetType::Post, "u1").await.unwrap();
    }

    #[tokio::test]
    async fn test_is_shared_true_when_found() {
        let record = create_test_share("s1", "t1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[record]])
                .into_connection(),
        );

        let repo = ShareRepository::new(db);
        let shared = repo.is_shared("t1", TargetType::Post, "u1").await.unwrap();

        assert!(shared);
    }

    #[tokio::test]
    async fn test_is_shared_false_when_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<share::Model>::new()])
                .into_connection(),
        );

        let repo = ShareRepository::new(db);
        let shared = repo.is_shared("t1", TargetType::Post, "u1").await.unwrap();

        assert!(!shared);
    }

    #[tokio::test]
    async fn test_count_by_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[btreemap! {
                    "num_items" => Value::BigInt(Some(3)),
                }]])
                .into_connection(),
        );

        let repo = ShareRepository::new(db);
        let count = repo.count_by_user(TargetType::Post, "u1").await.unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_find_by_target_returns_page_and_total() {
        let s1 = create_test_share("s1", "t1", "u1");
        let s2 = create_test_share("s2", "t1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[s1, s2]])
                .append_query_results([[btreemap! {
                    "num_items" => Value::BigInt(Some(2)),
                }]])
                .into_connection(),
        );

        let repo = ShareRepository::new(db);
        let (records, total) = repo
            .find_by_target("t1", TargetType::Post, &Pagination::new(1, 10))
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(total, 2);
    }
}
