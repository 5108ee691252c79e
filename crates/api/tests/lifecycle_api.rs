//! Integration tests for the request lifecycle through the HTTP API.

mod common;

use assert_matches::assert_matches;
use axum::body::Body;
use axum::http::{header::AUTHORIZATION, Method, Request, StatusCode};
use chrono::{Duration, Utc};
use common::{body_json, staff_get, staff_post, staff_put_json, submit_contact};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use writinghub_api::engine::lifecycle;
use writinghub_api::error::AppError;
use writinghub_core::error::CoreError;
use writinghub_core::service_request::{RequestAction, RequestStatus};

async fn action(app: axum::Router, id: i64, action: &str) -> axum::response::Response {
    staff_post(app, &format!("/api/v1/staff/requests/{id}/{action}")).await
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_creates_pending_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = submit_contact(app, "Amina@Example.com ", "Thesis help").await;

    assert_eq!(request["status"], "pending");
    assert_eq!(request["title"], "Thesis help");
    assert!(request["completed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_lifecycle_stamps_completed_at(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "a@example.com", "Data analysis").await["id"]
        .as_i64()
        .unwrap();

    let response = action(app.clone(), id, "accept").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "accepted");

    let response = action(app.clone(), id, "start").await;
    assert_eq!(body_json(response).await["data"]["status"], "in_progress");

    let response = action(app, id, "complete").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["completed_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accepted_request_can_complete_directly(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "b@example.com", "Editing").await["id"]
        .as_i64()
        .unwrap();

    action(app.clone(), id, "accept").await;
    let response = action(app, id, "complete").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Rejected transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_cannot_complete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "c@example.com", "Proposal").await["id"]
        .as_i64()
        .unwrap();

    let response = action(app.clone(), id, "complete").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");

    let response = staff_get(app, &format!("/api/v1/staff/requests/{id}")).await;
    assert_eq!(body_json(response).await["data"]["status"], "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completing_twice_keeps_first_timestamp(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "d@example.com", "Articles").await["id"]
        .as_i64()
        .unwrap();

    action(app.clone(), id, "accept").await;
    let first = body_json(action(app.clone(), id, "complete").await).await;
    let completed_at = first["data"]["completed_at"].clone();

    let response = action(app.clone(), id, "complete").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = staff_get(app, &format!("/api/v1/staff/requests/{id}")).await;
    assert_eq!(body_json(response).await["data"]["completed_at"], completed_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_request_is_terminal(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "e@example.com", "Review").await["id"]
        .as_i64()
        .unwrap();

    assert_eq!(action(app.clone(), id, "cancel").await.status(), StatusCode::OK);
    assert_eq!(
        action(app.clone(), id, "accept").await.status(),
        StatusCode::CONFLICT
    );
    assert_eq!(action(app, id, "cancel").await.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_action_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "f@example.com", "Review").await["id"]
        .as_i64()
        .unwrap();

    let response = action(app, id, "archive").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_request_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = action(app, 999_999, "accept").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Staff authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_routes_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/v1/staff/requests")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/v1/staff/requests")
                .header(AUTHORIZATION, "Bearer not-the-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_routes_closed_without_configured_token(pool: PgPool) {
    let mut config = common::test_config();
    config.staff_token_hash = None;
    let app = common::build_test_app_with(pool, config);

    let response = staff_get(app, "/api/v1/staff/requests").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Side effects and derived fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_notifies_customer(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = submit_contact(app.clone(), "g@example.com", "Thesis").await;
    let id = request["id"].as_i64().unwrap();
    let customer_id = request["customer_id"].as_i64().unwrap();

    action(app.clone(), id, "accept").await;

    let response = staff_get(
        app,
        &format!("/api/v1/staff/customers/{customer_id}/notifications"),
    )
    .await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["notification_type"], "service_update");
    assert_eq!(items[0]["is_read"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overdue_flag_follows_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = submit_contact(app.clone(), "h@example.com", "Late work").await["id"]
        .as_i64()
        .unwrap();

    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    let response = staff_put_json(
        app.clone(),
        &format!("/api/v1/staff/requests/{id}"),
        json!({ "deadline": past, "assignee": "Editor A" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["assignee"], "Editor A");
    assert_eq!(json["data"]["is_overdue"], true);

    action(app.clone(), id, "accept").await;
    let json = body_json(action(app.clone(), id, "start").await).await;
    assert_eq!(json["data"]["is_overdue"], true);
    assert!(json["data"]["days_until_deadline"].as_i64().unwrap() < 0);

    let json = body_json(action(app, id, "complete").await).await;
    assert_eq!(json["data"]["is_overdue"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let first = submit_contact(app.clone(), "i@example.com", "One").await["id"]
        .as_i64()
        .unwrap();
    submit_contact(app.clone(), "j@example.com", "Two").await;
    action(app.clone(), first, "accept").await;

    let json = body_json(staff_get(app, "/api/v1/staff/requests?status=accepted").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], first);
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_engine_rejects_start_from_pending(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let id = submit_contact(app, "k@example.com", "Engine").await["id"]
        .as_i64()
        .unwrap();

    let result = lifecycle::apply(&pool, id, RequestAction::StartProgress).await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::InvalidTransition { from: "pending", .. }))
    );

    let accepted = lifecycle::apply(&pool, id, RequestAction::Accept).await.unwrap();
    assert_eq!(accepted.status, RequestStatus::Accepted);
    assert!(accepted.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_engine_missing_request(pool: PgPool) {
    let result = lifecycle::apply(&pool, 424_242, RequestAction::Cancel).await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::NotFound { id: 424_242, .. }))
    );
}
