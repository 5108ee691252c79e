//! Integration tests for the testimonial auto-generator.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, staff_post_json};
use serde_json::json;
use sqlx::PgPool;
use writinghub_api::engine::{lifecycle, testimonials};
use writinghub_core::catalog::ResearchCategory;
use writinghub_core::service_request::RequestAction;
use writinghub_core::testimonial::AUTO_RATING;
use writinghub_core::types::DbId;
use writinghub_db::models::customer::ContactDetails;
use writinghub_db::models::service::CreateResearchService;
use writinghub_db::models::service_request::CreateServiceRequest;
use writinghub_db::models::testimonial::CreateTestimonial;
use writinghub_db::repositories::{
    CustomerRepo, ResearchServiceRepo, ServiceRequestRepo, TestimonialRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn service(pool: &PgPool, name: &str, slug: &str) -> DbId {
    let input = CreateResearchService {
        name: name.to_string(),
        slug: None,
        category: ResearchCategory::Thesis,
        description: format!("{name} support"),
        detailed_description: None,
        price_from: None,
        price_to: None,
        turnaround_time: None,
        display_order: None,
        is_active: None,
    };
    ResearchServiceRepo::create(pool, &input, slug).await.unwrap().id
}

async fn customer(pool: &PgPool, email: &str, name: &str) -> DbId {
    CustomerRepo::upsert_contact(
        pool,
        &ContactDetails {
            email: email.to_string(),
            full_name: name.to_string(),
            phone: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Create a request and drive it to `completed`.
async fn completed_request(pool: &PgPool, customer_id: DbId, service_id: Option<DbId>) {
    let request = ServiceRequestRepo::create(
        pool,
        &CreateServiceRequest {
            customer_id,
            service_id,
            title: "Finished work".to_string(),
            description: "Delivered".to_string(),
            deadline: None,
            budget: None,
        },
    )
    .await
    .unwrap();
    lifecycle::apply(pool, request.id, RequestAction::Accept)
        .await
        .unwrap();
    lifecycle::apply(pool, request.id, RequestAction::Complete)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_backfill_creates_one_per_pair_and_is_idempotent(pool: PgPool) {
    let service_id = service(&pool, "Thesis Writing", "thesis-writing").await;
    let customer_id = customer(&pool, "asha@example.com", "Asha Mushi").await;

    completed_request(&pool, customer_id, Some(service_id)).await;
    completed_request(&pool, customer_id, Some(service_id)).await;
    completed_request(&pool, customer_id, None).await;

    assert_eq!(testimonials::backfill(&pool).await.unwrap(), 1);
    assert_eq!(testimonials::backfill(&pool).await.unwrap(), 0);

    assert_eq!(
        TestimonialRepo::count_for_pair(&pool, customer_id, service_id)
            .await
            .unwrap(),
        1
    );

    let all = TestimonialRepo::list_all(&pool, 50, 0).await.unwrap();
    assert_eq!(all.len(), 1);
    let generated = &all[0];
    assert!(generated.is_auto_generated);
    assert!(generated.is_published);
    assert!(!generated.is_featured);
    assert_eq!(generated.rating, AUTO_RATING);
    assert!(generated.quote.contains("Thesis Writing"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_backfill_ignores_unfinished_requests(pool: PgPool) {
    let service_id = service(&pool, "Data Analysis", "data-analysis").await;
    let customer_id = customer(&pool, "baraka@example.com", "Baraka").await;

    let request = ServiceRequestRepo::create(
        &pool,
        &CreateServiceRequest {
            customer_id,
            service_id: Some(service_id),
            title: "Still going".to_string(),
            description: "In progress".to_string(),
            deadline: None,
            budget: None,
        },
    )
    .await
    .unwrap();
    lifecycle::apply(&pool, request.id, RequestAction::Accept)
        .await
        .unwrap();

    assert_eq!(testimonials::backfill(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_manual_testimonial_blocks_generation(pool: PgPool) {
    let service_id = service(&pool, "Articles", "articles").await;
    let customer_id = customer(&pool, "chausiku@example.com", "Chausiku").await;

    let manual = TestimonialRepo::create_manual(
        &pool,
        &CreateTestimonial {
            customer_id,
            service_id: Some(service_id),
            rating: Some(4),
            quote: "Helpful and quick.".to_string(),
            is_published: Some(false),
        },
        4,
    )
    .await
    .unwrap();

    completed_request(&pool, customer_id, Some(service_id)).await;
    assert_eq!(testimonials::backfill(&pool).await.unwrap(), 0);

    let all = TestimonialRepo::list_all(&pool, 50, 0).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, manual.id);
    assert_eq!(all[0].rating, 4);
    assert_eq!(all[0].quote, "Helpful and quick.");
    assert!(!all[0].is_published);
    assert!(!all[0].is_auto_generated);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_backfills_create_one_row(pool: PgPool) {
    let service_id = service(&pool, "Concept Proposal", "concept-proposal").await;
    let customer_id = customer(&pool, "daudi@example.com", "Daudi").await;
    completed_request(&pool, customer_id, Some(service_id)).await;

    let (a, b) = tokio::join!(testimonials::backfill(&pool), testimonials::backfill(&pool));
    assert_eq!(a.unwrap() + b.unwrap(), 1);
    assert_eq!(
        TestimonialRepo::count_for_pair(&pool, customer_id, service_id)
            .await
            .unwrap(),
        1
    );
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_shows_generated_testimonial(pool: PgPool) {
    let service_id = service(&pool, "Research Design", "research-design").await;
    let customer_id = customer(&pool, "eliya@example.com", "Eliya Kweka").await;
    completed_request(&pool, customer_id, Some(service_id)).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/testimonials").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["customer_name"], "Eliya Kweka");
    assert_eq!(items[0]["service_name"], "Research Design");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_detail_includes_testimonials(pool: PgPool) {
    let service_id = service(&pool, "Editing", "editing").await;
    let other_id = service(&pool, "Proofreading", "proofreading").await;
    let customer_id = customer(&pool, "faraja@example.com", "Faraja").await;
    completed_request(&pool, customer_id, Some(service_id)).await;
    completed_request(&pool, customer_id, Some(other_id)).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/services/{service_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Editing");
    let testimonials = json["data"]["testimonials"].as_array().unwrap();
    assert_eq!(testimonials.len(), 1);
    assert_eq!(testimonials[0]["service_id"], service_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_testimonial_rating_is_validated(pool: PgPool) {
    let customer_id = customer(&pool, "gift@example.com", "Gift").await;
    let app = common::build_test_app(pool);

    let response = staff_post_json(
        app.clone(),
        "/api/v1/staff/testimonials",
        json!({ "customer_id": customer_id, "rating": 9, "quote": "Great" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = staff_post_json(
        app,
        "/api/v1/staff/testimonials",
        json!({ "customer_id": customer_id, "quote": "Great" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["rating"], AUTO_RATING);
}
