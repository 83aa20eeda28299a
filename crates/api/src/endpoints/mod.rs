//! API endpoints.

mod follow;
mod like;
mod share;

use axum::Router;

use crate::state::AppState;
use action_common::{AppError, AppResult};
use action_db::entities::TargetType;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/follow", follow::router())
        .nest("/like", like::router())
        .nest("/share", share::router())
}

/// Reject requests whose caller identity is absent or empty.
fn require_user(user_id: &str) -> AppResult<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::UserMissing);
    }
    Ok(())
}

/// Decode the wire integer into a target type.
fn parse_target_type(value: i32) -> AppResult<TargetType> {
    TargetType::try_from(value)
        .map_err(|v| AppError::Validation(format!("unknown target type: {v}")))
}
