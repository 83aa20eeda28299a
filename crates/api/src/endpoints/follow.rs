//! Follow endpoints.

use axum::{Json, Router, extract::State, routing::post};
use action_common::{AppResult, Pagination};
use action_core::FollowItem;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_target_type, require_user};
use crate::{response::ApiResponse, state::AppState};

/// Follow action request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub target_id: String,
    pub target_type: i32,
    pub user_id: String,
}

/// Target-keyed request (no user identity required).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRequest {
    pub target_id: String,
    pub target_type: i32,
}

/// Target-keyed listing request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TargetListRequest {
    pub target_id: String,
    pub target_type: i32,
    #[validate(nested)]
    pub pagination: Pagination,
}

/// User-keyed request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub target_type: i32,
    pub user_id: String,
}

/// User-keyed listing request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListRequest {
    pub target_type: i32,
    pub user_id: String,
    #[validate(nested)]
    pub pagination: Pagination,
}

/// Follow state response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStateResponse {
    pub followed: bool,
    pub state: &'static str,
}

/// Count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: u64,
}

/// Paginated follow listing response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowListResponse {
    pub follows: Vec<FollowItem>,
    pub total: u64,
}

/// Follow a target.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<()>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    state
        .follow_service
        .follow(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Cancel a follow.
async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<()>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    state
        .follow_service
        .unfollow(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Whether the user follows the target, with the full toggle state.
async fn get_state(
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<FollowStateResponse>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    let follow_state = state
        .follow_service
        .follow_state(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(FollowStateResponse {
        followed: follow_state.is_active(),
        state: follow_state.as_str(),
    }))
}

/// Number of follow records for a target.
async fn count(
    State(state): State<AppState>,
    Json(req): Json<TargetRequest>,
) -> AppResult<ApiResponse<CountResponse>> {
    let target_type = parse_target_type(req.target_type)?;

    let count = state
        .follow_service
        .count_by_target(&req.target_id, target_type)
        .await?;

    Ok(ApiResponse::ok(CountResponse { count }))
}

/// Page of follows for a target.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<TargetListRequest>,
) -> AppResult<ApiResponse<FollowListResponse>> {
    req.validate()?;
    let target_type = parse_target_type(req.target_type)?;

    let (follows, total) = state
        .follow_service
        .list_by_target(&req.target_id, target_type, &req.pagination)
        .await?;

    Ok(ApiResponse::ok(FollowListResponse { follows, total }))
}

/// Number of follow records by a user.
async fn user_count(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> AppResult<ApiResponse<CountResponse>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    let count = state
        .follow_service
        .count_by_user(target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(CountResponse { count }))
}

/// Page of follows by a user.
async fn user_list(
    State(state): State<AppState>,
    Json(req): Json<UserListRequest>,
) -> AppResult<ApiResponse<FollowListResponse>> {
    require_user(&req.user_id)?;
    req.validate()?;
    let target_type = parse_target_type(req.target_type)?;

    let (follows, total) = state
        .follow_service
        .list_by_user(target_type, &req.user_id, &req.pagination)
        .await?;

    Ok(ApiResponse::ok(FollowListResponse { follows, total }))
}

/// Create the follow router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/cancel", post(cancel))
        .route("/state", post(get_state))
        .route("/count", post(count))
        .route("/list", post(list))
        .route("/user/count", post(user_count))
        .route("/user/list", post(user_list))
}
