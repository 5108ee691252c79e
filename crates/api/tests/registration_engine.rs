//! Integration tests for workshop registration: capacity, duplicates, and
//! staff actions.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_json, staff_get, staff_post};
use serde_json::json;
use sqlx::PgPool;
use writinghub_api::engine::registration::{self, RegistrationOutcome};
use writinghub_api::error::AppError;
use writinghub_core::error::CoreError;
use writinghub_core::registration::{RegistrationAction, RegistrationStatus};
use writinghub_core::types::DbId;
use writinghub_db::models::customer::ContactDetails;
use writinghub_db::models::workshop::{CreateWorkshop, UpdateWorkshop};
use writinghub_db::repositories::{CustomerRepo, WorkshopRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn workshop(pool: &PgPool, slug: &str, max_participants: Option<i32>, days_ahead: i64) -> DbId {
    let input = CreateWorkshop {
        title: format!("Workshop {slug}"),
        slug: None,
        description: "Academic writing clinic".to_string(),
        detailed_description: None,
        scheduled_at: Utc::now() + Duration::days(days_ahead),
        location: Some("Dar es Salaam".to_string()),
        is_online: None,
        meeting_url: None,
        max_participants,
        facilitator: Some("Dr. Mhando".to_string()),
        price: Some(50_000.0),
    };
    WorkshopRepo::create(pool, &input, Some(slug)).await.unwrap().id
}

async fn customer(pool: &PgPool, email: &str) -> DbId {
    CustomerRepo::upsert_contact(
        pool,
        &ContactDetails {
            email: email.to_string(),
            full_name: "Workshop Guest".to_string(),
            phone: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn registration_rows(pool: &PgPool, workshop_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM workshop_registrations WHERE workshop_id = $1")
        .bind(workshop_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_capacity_is_enforced_and_freed_by_cancel(pool: PgPool) {
    let workshop_id = workshop(&pool, "capacity", Some(2), 7).await;
    let a = customer(&pool, "a@example.com").await;
    let b = customer(&pool, "b@example.com").await;
    let c = customer(&pool, "c@example.com").await;

    let first = registration::register(&pool, workshop_id, a, None).await.unwrap();
    assert_matches!(first, RegistrationOutcome::Created(_));
    let second = registration::register(&pool, workshop_id, b, None).await.unwrap();
    assert_matches!(second, RegistrationOutcome::Created(_));

    let third = registration::register(&pool, workshop_id, c, None).await;
    assert_matches!(
        third,
        Err(AppError::Core(CoreError::WorkshopFull { capacity: 2, .. }))
    );
    assert_eq!(registration_rows(&pool, workshop_id).await, 2);

    let cancelled = registration::apply(&pool, first.registration().id, RegistrationAction::Cancel)
        .await
        .unwrap();
    assert_eq!(cancelled.status, RegistrationStatus::Cancelled);

    let third = registration::register(&pool, workshop_id, c, None).await.unwrap();
    assert_matches!(third, RegistrationOutcome::Created(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_registering_twice_returns_existing(pool: PgPool) {
    let workshop_id = workshop(&pool, "twice", None, 3).await;
    let a = customer(&pool, "a@example.com").await;

    let first = registration::register(&pool, workshop_id, a, Some("Vegetarian lunch"))
        .await
        .unwrap();
    let second = registration::register(&pool, workshop_id, a, None).await.unwrap();

    assert!(second.is_already_registered());
    assert_eq!(second.registration().id, first.registration().id);
    assert_eq!(second.registration().special_requirements, "Vegetarian lunch");
    assert_eq!(registration_rows(&pool, workshop_id).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancelled_pair_reports_already_registered(pool: PgPool) {
    let workshop_id = workshop(&pool, "cancelled-pair", Some(1), 3).await;
    let a = customer(&pool, "a@example.com").await;

    let first = registration::register(&pool, workshop_id, a, None).await.unwrap();
    registration::apply(&pool, first.registration().id, RegistrationAction::Cancel)
        .await
        .unwrap();

    let again = registration::register(&pool, workshop_id, a, None).await.unwrap();
    assert!(again.is_already_registered());
    assert_eq!(again.registration().status, RegistrationStatus::Cancelled);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_pair_wins_over_full_workshop(pool: PgPool) {
    let workshop_id = workshop(&pool, "full-existing", Some(1), 3).await;
    let a = customer(&pool, "a@example.com").await;

    registration::register(&pool, workshop_id, a, None).await.unwrap();
    let again = registration::register(&pool, workshop_id, a, None).await.unwrap();
    assert!(again.is_already_registered());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_workshop_is_not_found(pool: PgPool) {
    let workshop_id = workshop(&pool, "inactive", None, 3).await;
    WorkshopRepo::update(
        &pool,
        workshop_id,
        &UpdateWorkshop {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let a = customer(&pool, "a@example.com").await;

    let result = registration::register(&pool, workshop_id, a, None).await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::NotFound { entity: "Workshop", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_show_requires_started_workshop(pool: PgPool) {
    let upcoming = workshop(&pool, "upcoming", None, 3).await;
    let past = workshop(&pool, "past", None, -1).await;
    let a = customer(&pool, "a@example.com").await;

    let upcoming_reg = registration::register(&pool, upcoming, a, None).await.unwrap();
    let result = registration::apply(
        &pool,
        upcoming_reg.registration().id,
        RegistrationAction::NoShow,
    )
    .await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::InvalidTransition { .. }))
    );

    let past_reg = registration::register(&pool, past, a, None).await.unwrap();
    let updated = registration::apply(&pool, past_reg.registration().id, RegistrationAction::NoShow)
        .await
        .unwrap();
    assert_eq!(updated.status, RegistrationStatus::NoShow);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attended_is_terminal_and_stamped(pool: PgPool) {
    let workshop_id = workshop(&pool, "attend", None, -1).await;
    let a = customer(&pool, "a@example.com").await;
    let reg = registration::register(&pool, workshop_id, a, None).await.unwrap();
    let id = reg.registration().id;

    let attended = registration::apply(&pool, id, RegistrationAction::MarkAttended)
        .await
        .unwrap();
    assert_eq!(attended.status, RegistrationStatus::Attended);
    assert!(attended.attended_at.is_some());

    let result = registration::apply(&pool, id, RegistrationAction::Cancel).await;
    assert_matches!(
        result,
        Err(AppError::Core(CoreError::InvalidTransition { from: "attended", .. }))
    );
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

fn form(email: &str) -> serde_json::Value {
    json!({
        "full_name": "Neema Joseph",
        "email": email,
        "phone": "+255 700 000 000",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_endpoint_status_codes(pool: PgPool) {
    let workshop_id = workshop(&pool, "http", Some(1), 5).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/workshops/{workshop_id}/register");

    let response = post_json(app.clone(), &uri, form("neema@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["already_registered"], false);
    assert_eq!(json["data"]["registration"]["status"], "registered");
    let registration_id = json["data"]["registration"]["id"].clone();

    let response = post_json(app.clone(), &uri, form("NEEMA@example.com")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["already_registered"], true);
    assert_eq!(json["data"]["registration"]["id"], registration_id);

    let response = post_json(app.clone(), &uri, form("other@example.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "WORKSHOP_FULL");

    let response = common::get(app, &format!("/api/v1/workshops/{workshop_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["registered_count"], 1);
    assert_eq!(json["data"]["is_full"], true);
    assert_eq!(json["data"]["spots_left"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_unknown_workshop_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/workshops/999999/register", form("x@example.com")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(customers, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_inactive_workshop_records_no_customer(pool: PgPool) {
    let workshop_id = workshop(&pool, "closed", None, 3).await;
    WorkshopRepo::update(
        &pool,
        workshop_id,
        &UpdateWorkshop {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        &format!("/api/v1/workshops/{workshop_id}/register"),
        form("late@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let found = CustomerRepo::find_by_email(&pool, "late@example.com").await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_cancels_registration_over_http(pool: PgPool) {
    let workshop_id = workshop(&pool, "staff-cancel", Some(1), 5).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/workshops/{workshop_id}/register"),
        form("zawadi@example.com"),
    )
    .await;
    let registration_id = body_json(response).await["data"]["registration"]["id"]
        .as_i64()
        .unwrap();

    let response = staff_post(
        app.clone(),
        &format!("/api/v1/staff/registrations/{registration_id}/cancel"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "cancelled");

    let response = staff_get(
        app,
        &format!("/api/v1/staff/workshops/{workshop_id}/registrations"),
    )
    .await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], "zawadi@example.com");
    assert_eq!(rows[0]["status"], "cancelled");
}
