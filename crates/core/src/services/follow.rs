//! Follow service.

use action_common::{AppError, AppResult, Pagination};
use action_db::entities::{TargetType, follow};
use action_db::repositories::{FollowRepository, ToggleState};
use serde::Serialize;

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
}

/// External shape of a follow record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowItem {
    pub id: String,
    pub target_id: String,
    pub target_type: i32,
    pub user_id: String,
    /// Seconds since the Unix epoch.
    pub created_at: i64,
}

impl From<follow::Model> for FollowItem {
    fn from(record: follow::Model) -> Self {
        Self {
            id: record.id,
            target_id: record.target_id,
            target_type: record.target_type as i32,
            user_id: record.user_id,
            created_at: record.created_at.timestamp(),
        }
    }
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub const fn new(follow_repo: FollowRepository) -> Self {
        Self { follow_repo }
    }

    /// Follow a target.
    ///
    /// Rejects duplicate activation: an already-active follow errors, a
    /// cancelled or never-seen one activates.
    pub async fn follow(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        let state = self
            .follow_repo
            .toggle_state(target_id, target_type, user_id)
            .await?;

        if state.is_active() {
            return Err(AppError::AlreadyActive("follow".to_string()));
        }

        if let Err(e) = self
            .follow_repo
            .activate(target_id, target_type, user_id)
            .await
        {
            tracing::warn!(error = %e, target_id = %target_id, user_id = %user_id, "Follow activation failed");
            return Err(AppError::OperationFailed);
        }

        Ok(())
    }

    /// Cancel a follow.
    ///
    /// A triple that was never followed is an idempotent success; a follow
    /// that exists but is already cancelled is rejected.
    pub async fn unfollow(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<()> {
        match self
            .follow_repo
            .toggle_state(target_id, target_type, user_id)
            .await?
        {
            ToggleState::Absent => Ok(()),
            ToggleState::Cancelled => Err(AppError::NotActive("follow".to_string())),
            ToggleState::Active => {
                if let Err(e) = self
                    .follow_repo
                    .cancel(target_id, target_type, user_id)
                    .await
                {
                    tracing::warn!(error = %e, target_id = %target_id, user_id = %user_id, "Follow cancellation failed");
                    return Err(AppError::OperationFailed);
                }
                Ok(())
            }
        }
    }

    /// Toggle state of a follow for a key triple.
    pub async fn follow_state(
        &self,
        target_id: &str,
        target_type: TargetType,
        user_id: &str,
    ) -> AppResult<ToggleState> {
        self.follow_repo
            .toggle_state(target_id, target_type, user_id)
            .await
    }

    /// Number of follow records for a target.
    pub async fn count_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> AppResult<u64> {
        self.follow_repo.count_by_target(target_id, target_type).await
    }

    /// Number of follow records by a user.
    pub async fn count_by_user(&self, target_type: TargetType, user_id: &str) -> AppResult<u64> {
        self.follow_repo.count_by_user(target_type, user_id).await
    }

    /// Page of follows for a target, newest first.
    pub async fn list_by_target(
        &self,
        target_id: &str,
        target_type: TargetType,
        pagination: &Pagination,
    ) -> AppResult<(Vec<FollowItem>, u64)> {
        let (records, total) = self
            .follow_repo
            .find_by_target(target_id, target_type, pagination)
            .await?;

        Ok((records.into_iter().map(FollowItem::from).collect(), total))
    }

    /// Page of follows by a user, newest first.
    pub async fn list_by_user(
        &self,
        target_type: TargetType,
        user_id: &str,
        pagination: &Pagination,
    ) -> AppResult<(Vec<FollowItem>, u64)> {
        let (records, total) = self
            .follow_repo
            .find_by_user(target_type, user_id, pagination)
            .await?;

        Ok((records.into_iter().map(FollowItem::from).collect(), total))
    }
}
