//! Like endpoints.

use axum::{Json, Router, extract::State, routing::post};
use action_common::{AppResult, Pagination};
use action_core::LikeItem;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_target_type, require_user};
use crate::{response::ApiResponse, state::AppState};

/// Like action request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
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

/// Like state response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStateResponse {
    pub liked: bool,
    pub state: &'static str,
}

/// Count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: u64,
}

/// Paginated like listing response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeListResponse {
    pub likes: Vec<LikeItem>,
    pub total: u64,
}

/// Like a target.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<()>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    state
        .like_service
        .like(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Cancel a like.
async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<()>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    state
        .like_service
        .unlike(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Whether the user likes the target, with the full toggle state.
async fn get_state(
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<LikeStateResponse>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    let like_state = state
        .like_service
        .like_state(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(LikeStateResponse {
        liked: like_state.is_active(),
        state: like_state.as_str(),
    }))
}

/// Number of like records for a target.
async fn count(
    State(state): State<AppState>,
    Json(req): Json<TargetRequest>,
) -> AppResult<ApiResponse<CountResponse>> {
    let target_type = parse_target_type(req.target_type)?;

    let count = state
        .like_service
        .count_by_target(&req.target_id, target_type)
        .await?;

    Ok(ApiResponse::ok(CountResponse { count }))
}

/// Page of likes for a target.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<TargetListRequest>,
) -> AppResult<ApiResponse<LikeListResponse>> {
    req.validate()?;
    let target_type = parse_target_type(req.target_type)?;

    let (likes, total) = state
        .like_service
        .list_by_target(&req.target_id, target_type, &req.pagination)
        .await?;

    Ok(ApiResponse::ok(LikeListResponse { likes, total }))
}

/// Number of like records by a user.
async fn user_count(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> AppResult<ApiResponse<CountResponse>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    let count = state
        .like_service
        .count_by_user(target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(CountResponse { count }))
}

/// Page of likes by a user.
async fn user_list(
    State(state): State<AppState>,
    Json(req): Json<UserListRequest>,
) -> AppResult<ApiResponse<LikeListResponse>> {
    require_user(&req.user_id)?;
    req.validate()?;
    let target_type = parse_target_type(req.target_type)?;

    let (likes, total) = state
        .like_service
        .list_by_user(target_type, &req.user_id, &req.pagination)
        .await?;

    Ok(ApiResponse::ok(LikeListResponse { likes, total }))
}

/// Create the like router.
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
