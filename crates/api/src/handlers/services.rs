//! Handlers for research services.
//!
//! Public endpoints list the active catalog, show a service with its
//! published testimonials, and accept a request for a service. Staff
//! endpoints manage the catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use writinghub_core::catalog::{validate_name, validate_price_range};
use writinghub_core::error::CoreError;
use writinghub_core::service_request::{validate_budget, validate_new_request};
use writinghub_core::types::{DbId, Timestamp};
use writinghub_db::models::service::{CreateResearchService, ResearchService, UpdateResearchService};
use writinghub_db::models::service_request::CreateServiceRequest;
use writinghub_db::models::testimonial::{PublishedTestimonial, TestimonialListParams};
use writinghub_db::repositories::{ResearchServiceRepo, ServiceRequestRepo, TestimonialRepo};

use crate::engine::testimonials;
use crate::error::{AppError, AppResult};
use crate::handlers::catalog_slug;
use crate::handlers::contact::resolve_customer;
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Published testimonials shown on a service page.
const DETAIL_TESTIMONIAL_LIMIT: i64 = 6;

/// A service with its published testimonials.
#[derive(Debug, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: ResearchService,
    pub testimonials: Vec<PublishedTestimonial>,
}

/// Body of a request submitted from a service page.
#[derive(Debug, Deserialize)]
pub struct ServiceRequestForm {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Defaults to "Request for <service name>".
    pub title: Option<String>,
    pub description: String,
    pub deadline: Option<Timestamp>,
    pub budget: Option<f64>,
}

fn service_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ResearchService",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /services
// ---------------------------------------------------------------------------

pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ResearchService>>>> {
    let services = ResearchServiceRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

// ---------------------------------------------------------------------------
// GET /services/{id}
// ---------------------------------------------------------------------------

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ServiceDetail>>> {
    let service = ResearchServiceRepo::find_active(&state.pool, id)
        .await?
        .ok_or(service_not_found(id))?;

    testimonials::backfill_best_effort(&state.pool).await;

    let params = TestimonialListParams {
        service_id: Some(id),
        ..Default::default()
    };
    let testimonials =
        TestimonialRepo::list_published(&state.pool, &params, DETAIL_TESTIMONIAL_LIMIT).await?;

    Ok(Json(DataResponse {
        data: ServiceDetail {
            service,
            testimonials,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /services/{id}/requests
// ---------------------------------------------------------------------------

/// Open a `pending` request bound to an active service.
pub async fn request_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ServiceRequestForm>,
) -> AppResult<impl IntoResponse> {
    let service = ResearchServiceRepo::find_active(&state.pool, id)
        .await?
        .ok_or(service_not_found(id))?;

    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Request for {}", service.name));
    validate_new_request(&title, &input.description)?;
    validate_budget(input.budget)?;

    let customer = resolve_customer(
        &state.pool,
        &input.email,
        &input.full_name,
        input.phone.as_deref(),
    )
    .await?;

    let request = ServiceRequestRepo::create(
        &state.pool,
        &CreateServiceRequest {
            customer_id: customer.id,
            service_id: Some(service.id),
            title,
            description: input.description,
            deadline: input.deadline,
            budget: input.budget,
        },
    )
    .await?;

    tracing::info!(
        request_id = request.id,
        customer_id = customer.id,
        service_id = service.id,
        "Service request submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

// ---------------------------------------------------------------------------
// GET /staff/services
// ---------------------------------------------------------------------------

pub async fn list_all_services(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ResearchService>>>> {
    let services = ResearchServiceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

// ---------------------------------------------------------------------------
// POST /staff/services
// ---------------------------------------------------------------------------

pub async fn create_service(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateResearchService>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_price_range(input.price_from, input.price_to)?;

    let pool = &state.pool;
    let slug = catalog_slug(input.slug.as_deref(), &input.name, |candidate| async move {
        ResearchServiceRepo::slug_exists(pool, &candidate).await
    })
    .await?;

    let service = ResearchServiceRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(service_id = service.id, slug = %slug, "Research service created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

// ---------------------------------------------------------------------------
// PUT /staff/services/{id}
// ---------------------------------------------------------------------------

pub async fn update_service(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateResearchService>,
) -> AppResult<Json<DataResponse<ResearchService>>> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }

    let existing = ResearchServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(service_not_found(id))?;
    validate_price_range(
        input.price_from.or(existing.price_from),
        input.price_to.or(existing.price_to),
    )?;

    let service = ResearchServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(service_not_found(id))?;

    tracing::info!(service_id = id, "Research service updated");

    Ok(Json(DataResponse { data: service }))
}

// ---------------------------------------------------------------------------
// DELETE /staff/services/{id}
// ---------------------------------------------------------------------------

/// Delete a service. Requests and testimonials that referenced it stay, with
/// no service attached.
pub async fn delete_service(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ResearchServiceRepo::delete(&state.pool, id).await? {
        return Err(service_not_found(id));
    }
    tracing::info!(service_id = id, "Research service deleted");
    Ok(StatusCode::NO_CONTENT)
}
