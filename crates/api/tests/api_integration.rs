//! API integration tests.
//!
//! These tests verify the endpoint wiring, request validation, and error
//! mapping against mock databases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use action_api::{AppState, router};
use action_core::{FollowService, LikeService, ShareService};
use action_db::entities::{follow, share};
use action_db::repositories::{FollowRepository, LikeRepository, ShareRepository};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

/// A mock connection that returns nothing.
fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

/// Assemble the app from one mock connection per pipeline.
fn create_test_router(
    follow_db: DatabaseConnection,
    like_db: DatabaseConnection,
    share_db: DatabaseConnection,
) -> Router {
    let state = AppState {
        follow_service: FollowService::new(FollowRepository::new(Arc::new(follow_db))),
        like_service: LikeService::new(LikeRepository::new(Arc::new(like_db))),
        share_service: ShareService::new(ShareRepository::new(Arc::new(share_db))),
    };

    router().with_state(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn test_follow(id: &str, is_cancel: bool) -> follow::Model {
    follow::Model {
        id: id.to_string(),
        target_id: "t1".to_string(),
        target_type: action_db::entities::TargetType::Post,
        user_id: "u1".to_string(),
        is_cancel,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_follow_create_without_user_returns_unauthorized() {
    let app = create_test_router(empty_db(), empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/create",
            r#"{"targetId":"t1","targetType":2,"userId":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_follow_create_succeeds_for_new_triple() {
    let follow_db = MockDatabase::new(DatabaseBackend::Postgres)
        // toggle_state lookup, then the activate-path lookup
        .append_query_results([Vec::<follow::Model>::new(), Vec::<follow::Model>::new()])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = create_test_router(follow_db, empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/create",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_follow_create_conflicts_when_already_active() {
    let follow_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_follow("f1", false)]])
        .into_connection();
    let app = create_test_router(follow_db, empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/create",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_follow_cancel_on_never_followed_succeeds() {
    let follow_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<follow::Model>::new()])
        .into_connection();
    let app = create_test_router(follow_db, empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/cancel",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_follow_cancel_on_cancelled_record_conflicts() {
    let follow_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[test_follow("f1", true)]])
        .into_connection();
    let app = create_test_router(follow_db, empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/cancel",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_follow_count_skips_user_validation() {
    let follow_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(7)]])
        .into_connection();
    let app = create_test_router(follow_db, empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/count",
            r#"{"targetId":"t1","targetType":2}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_follow_list_rejects_zero_page() {
    let app = create_test_router(empty_db(), empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/list",
            r#"{"targetId":"t1","targetType":2,"pagination":{"page":0,"limit":10}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_follow_create_rejects_unknown_target_type() {
    let app = create_test_router(empty_db(), empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/follow/create",
            r#"{"targetId":"t1","targetType":42,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_share_create_succeeds() {
    let share_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = create_test_router(empty_db(), empty_db(), share_db);

    let response = app
        .oneshot(post_json(
            "/share/create",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_share_has_no_cancel_route() {
    let app = create_test_router(empty_db(), empty_db(), empty_db());

    let response = app
        .oneshot(post_json(
            "/share/cancel",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_state_reports_not_shared_for_missing_record() {
    let share_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<share::Model>::new()])
        .into_connection();
    let app = create_test_router(empty_db(), empty_db(), share_db);

    let response = app
        .oneshot(post_json(
            "/share/state",
            r#"{"targetId":"t1","targetType":2,"userId":"u1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router(empty_db(), empty_db(), empty_db());

    let response = app
        .oneshot(post_json("/bookmark/create", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_json_returns_client_error() {
    let app = create_test_router(empty_db(), empty_db(), empty_db());

    let response = app
        .oneshot(post_json("/like/create", "{not json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
