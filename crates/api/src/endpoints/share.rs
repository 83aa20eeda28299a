//! Share endpoints.
//!
//! Shares are one-shot, so there is no cancel route.

use axum::{Json, Router, extract::State, routing::post};
use action_common::{AppResult, Pagination};
use action_core::ShareItem;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_target_type, require_user};
use crate::{response::ApiResponse, state::AppState};

/// Share action request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
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

/// Share state response.
///
/// Shares have no toggle, so this is a plain found/not-found boolean.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareStateResponse {
    pub shared: bool,
}

/// Count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: u64,
}

/// Paginated share listing response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareListResponse {
    pub shares: Vec<ShareItem>,
    pub total: u64,
}

/// Share a target.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<ShareRequest>,
) -> AppResult<ApiResponse<()>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    state
        .share_service
        .share(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Whether the user has shared the target at least once.
async fn get_state(
    State(state): State<AppState>,
    Json(req): Json<ShareRequest>,
) -> AppResult<ApiResponse<ShareStateResponse>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    let shared = state
        .share_service
        .is_shared(&req.target_id, target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(ShareStateResponse { shared }))
}

/// Number of share records for a target.
async fn count(
    State(state): State<AppState>,
    Json(req): Json<TargetRequest>,
) -> AppResult<ApiResponse<CountResponse>> {
    let target_type = parse_target_type(req.target_type)?;

    let count = state
        .share_service
        .count_by_target(&req.target_id, target_type)
        .await?;

    Ok(ApiResponse::ok(CountResponse { count }))
}

/// Page of shares for a target.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<TargetListRequest>,
) -> AppResult<ApiResponse<ShareListResponse>> {
    req.validate()?;
    let target_type = parse_target_type(req.target_type)?;

    let (shares, total) = state
        .share_service
        .list_by_target(&req.target_id, target_type, &req.pagination)
        .await?;

    Ok(ApiResponse::ok(ShareListResponse { shares, total }))
}

/// Number of share records by a user.
async fn user_count(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> AppResult<ApiResponse<CountResponse>> {
    require_user(&req.user_id)?;
    let target_type = parse_target_type(req.target_type)?;

    let count = state
        .share_service
        .count_by_user(target_type, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(CountResponse { count }))
}

/// Page of shares by a user.
async fn user_list(
    State(state): State<AppState>,
    Json(req): Json<UserListRequest>,
) -> AppResult<ApiResponse<ShareListResponse>> {
    require_user(&req.user_id)?;
    req.validate()?;
    let target_type = parse_target_type(req.target_type)?;

    let (shares, total) = state
        .share_service
        .list_by_user(target_type, &req.user_id, &req.pagination)
        .await?;

    Ok(ApiResponse::ok(ShareListResponse { shares, total }))
}

/// Create the share router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/state", post(get_state))
        .route("/count", post(count))
        .route("/list", post(list))
        .route("/user/count", post(user_count))
        .route("/user/list", post(user_list))
}
