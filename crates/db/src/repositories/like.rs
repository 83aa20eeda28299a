//! Like repository.

use std::sync::Arc;

use crate::cache::ActionCache;
use crate::entities::{Like, TargetType, like};
use crate::repositories::ToggleState;
use action_common::{AppError, AppResult, IdGenerator, Pagination};
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

const KIND: &str = "like";

/// Like repository, sole owner of like rows and the cache entries that
/// shadow single-record lookups.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
    cache: Option<ActionCache>,
    id_gen: IdGenerator,
}

impl LikeRepository {
    /// Create a new like repository without a cache.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            cache: None,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new like repository whose single-record lookups go through
    /// Redis.
    #[must_use]
    pub const fn with_cache(db: Arc<DatabaseConnection>, cache: ActionCache) -> Self {
        Self {
            db,
            cache: Some(cache),
            id_gen: IdGenerator::new(),
        }
    }

    /// Activate the like for a key triple.
    ///
    /// Same discipline as the follow store: flip an existing record back to
    /// active in place, or insert with an `ON CONFLICT` upsert on the
    /// natural key so concurrent activations converge on one row.
    pub async fn activate(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        match self
            .find_by_key_cached(target_id, target_type, user_id)
            .await?
        {
            Some(record) => {
                Like::update_many()
                    .col_expr(like::Column::IsCancel, Expr::value(false))
                    .col_expr(like::Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(like::Column::TargetId.eq(target_id))
                    .filter(like::Column::TargetType.eq(target_type))
                    .filter(like::Column::UserId.eq(user_id))
                    .exec(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                self.invalidate_record(&record).await;
            }
            None => {
                let now = Utc::now().into();
                let record = like::Model {
                    id: self.id_gen.generate(),
                    target_id: target_id.to_string(),
                    target_type,
                    user_id: user_id.to_string(),
                    is_cancel: false,
                    created_at: now,
                    updated_at: now,
                };

                Like::insert(like::ActiveModel {
                    id: Set(record.id.clone()),
                    target_id: Set(record.target_id.clone()),
                    target_type: Set(record.target_type),
                    user_id: Set(record.user_id.clone()),
                    is_cancel: Set(record.is_cancel),
                    created_at: Set(record.created_at),
                    updated_at: Set(record.updated_at),
                })
                .on_conflict(
                    OnConflict::columns([
                        like::Column::TargetId,
                        like::Column::TargetType,
                        like::Column::UserId,
                    ])
                    .update_columns([like::Column::IsCancel, like::Column::UpdatedAt])
                    .to_owned(),
                )
                .exec_without_returning(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

                self.prime_record(&record).await;
            }
        }

        Ok(())
    }

    /// Toggle state for a key triple, read directly from the database.
    pub async fn toggle_state(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<ToggleState> {
        let found = self.find_by_key(target_id, target_type, user_id).await?;

        Ok(match found {
            None => ToggleState::Absent,
            Some(record) if record.is_cancel => ToggleState::Cancelled,
            Some(_) => ToggleState::Active,
        })
    }

    /// Whether the triple currently has an active like.
    pub async fn is_active(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<bool> {
        Ok(self
            .toggle_state(target_id, target_type, user_id)
            .await?
            .is_active())
    }

    /// Cancel the like for a key triple.
    ///
    /// A missing record is an idempotent no-op, not an error.
    pub async fn cancel(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        let Some(record) = self.find_by_key(target_id, target_type, user_id).await? else {
            return Ok(());
        };

        Like::update_many()
            .col_expr(like::Column::IsCancel, Expr::value(true))
            .col_expr(like::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(like::Column::TargetId.eq(target_id))
            .filter(like::Column::TargetType.eq(target_type))
            .filter(like::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.invalidate_record(&record).await;

        Ok(())
    }

    /// Point lookup by record id, served cache-aside from the record key
    /// space primed on insert.
    pub async fn find_by_id(&self, target_id: &str, id: &str) -> AppResult<Option<like::Model>> {
        if let Some(cache) = &self.cache {
            let key = cache.record_key_for(KIND, target_id, id);
            match cache.get::<like::Model>(&key).await {
                Ok(Some(record)) => return Ok(Some(record)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Like cache read failed, falling back to database");
                }
            }

            let found = self.find_by_id_uncached(id).await?;
            if let Some(record) = &found
                && let Err(e) = cache.set(&key, record).await
            {
                tracing::warn!(error = %e, "Like cache write failed");
            }
            return Ok(found);
        }

        self.find_by_id_uncached(id).await
    }

    /// Count like rows for a target, cancelled included.
    pub async fn count_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::TargetId.eq(target_id))
            .filter(like::Column::TargetType.eq(target_type))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count like rows by a user, cancelled included.
    pub async fn count_by_user(&self, target_type: TargetType, user_id: &str) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::TargetType.eq(target_type))
            .filter(like::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Page of likes for a target, newest first, with the unpaginated total.
    pub async fn find_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
        pagination: &Pagination,
    ) -> AppResult<(Vec<like::Model>, u64)> {
        let records = Like::find()
            .filter(like::Column::TargetId.eq(target_id))
            .filter(like::Column::TargetType.eq(target_type))
            .order_by_desc(like::Column::CreatedAt)
            // id breaks ties between equal timestamps
            .order_by_desc(like::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let total = self.count_by_target(target_id, target_type).await?;

        Ok((records, total))
    }

    /// Page of likes by a user, newest first, with the unpaginated total.
    pub async fn find_by_user(
        &self,
        target_type: TargetType,
        user_id: &str,
        pagination: &Pagination,
    ) -> AppResult<(Vec<like::Model>, u64)> {
        let records = Like::find()
            .filter(like::Column::TargetType.eq(target_type))
            .filter(like::Column::UserId.eq(user_id))
            .order_by_desc(like::Column::CreatedAt)
            .order_by_desc(like::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let total = self.count_by_user(target_type, user_id).await?;

        Ok((records, total))
    }

    /// Find by natural key, bypassing the cache.
    async fn find_by_key(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::TargetId.eq(target_id))
            .filter(like::Column::TargetType.eq(target_type))
            .filter(like::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find by natural key through the cache, falling back to the database
    /// and populating the entry on a miss.
    async fn find_by_key_cached(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<Option<like::Model>> {
        let Some(cache) = &self.cache else {
            return self.find_by_key(target_id, target_type, user_id).await;
        };

        let key = cache.key_for(KIND, target_id, target_type as i32, user_id);
        match cache.get::<like::Model>(&key).await {
            Ok(Some(record)) => return Ok(Some(record)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Like cache read failed, falling back to database");
            }
        }

        let found = self.find_by_key(target_id, target_type, user_id).await?;
        if let Some(record) = &found
            && let Err(e) = cache.set(&key, record).await
        {
            tracing::warn!(error = %e, "Like cache write failed");
        }

        Ok(found)
    }

    async fn find_by_id_uncached(&self, id: &str) -> AppResult<Option<like::Model>> {
        Like::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Drop both cache entries shadowing a record after a write.
    async fn invalidate_record(&self, record: &like::Model) {
        if let Some(cache) = &self.cache {
            let keys = [
                cache.key_for(
                    KIND,
                    &record.target_id,
                    record.target_type as i32,
                    &record.user_id,
                ),
                cache.record_key_for(KIND, &record.target_id, &record.id),
            ];
            for key in keys {
                if let Err(e) = cache.invalidate(&key).await {
                    tracing::warn!(error = %e, key = %key, "Like cache invalidation failed");
                }
            }
        }
    }

    /// Prime the record key space for a freshly inserted record.
    async fn prime_record(&self, record: &like::Model) {
        if let Some(cache) = &self.cache {
            let key = cache.record_key_for(KIND, &record.target_id, &record.id);
            if let Err(e) = cache.set(&key, record).await {
                tracing::warn!(error = %e, "Like cache write failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

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
    async fn test_toggle_state_distinguishes_cancelled_from_absent() {
        let cancelled = create_test_like("l1", "t1", "u1", true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![cancelled], Vec::<like::Model>::new()])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);

        let first = repo
            .toggle_state("t1", TargetType::Post, "u1")
            .await
            .unwrap();
        let second = repo
            .toggle_state("t1", TargetType::Post, "u2")
            .await
            .unwrap();

        assert_eq!(first, ToggleState::Cancelled);
        assert_eq!(second, ToggleState::Absent);
    }

    #[tokio::test]
    async fn test_activate_missing_record_inserts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.activate("t1", TargetType::Post, "u1").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_missing_record_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );

        let repo = LikeRepository::new(db);
        let result = repo.cancel("t1", TargetType::Post, "u1").await;

        assert!(result.is_ok());
    }
}
