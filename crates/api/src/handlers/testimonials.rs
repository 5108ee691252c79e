//! Handlers for testimonials.
//!
//! Both listings run a backfill first so completed requests show up as
//! testimonials without waiting for the background job.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use writinghub_core::error::CoreError;
use writinghub_core::search::{clamp_limit, clamp_offset};
use writinghub_core::testimonial::{validate_quote, validate_rating, AUTO_RATING};
use writinghub_core::types::DbId;
use writinghub_db::models::testimonial::{
    CreateTestimonial, PublishedTestimonial, Testimonial, TestimonialListParams,
    UpdateTestimonialFlags,
};
use writinghub_db::repositories::{CustomerRepo, ResearchServiceRepo, TestimonialRepo};

use crate::engine::testimonials;
use crate::error::{AppError, AppResult};
use crate::handlers::customers::customer_not_found;
use crate::middleware::staff::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /testimonials
// ---------------------------------------------------------------------------

/// Published testimonials, featured first.
pub async fn list_published(
    State(state): State<AppState>,
    Query(params): Query<TestimonialListParams>,
) -> AppResult<Json<DataResponse<Vec<PublishedTestimonial>>>> {
    testimonials::backfill_best_effort(&state.pool).await;

    let limit = clamp_limit(params.limit, 20, 100);
    let items = TestimonialRepo::list_published(&state.pool, &params, limit).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /staff/testimonials
// ---------------------------------------------------------------------------

pub async fn list_all(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Testimonial>>>> {
    testimonials::backfill_best_effort(&state.pool).await;

    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);
    let items = TestimonialRepo::list_all(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /staff/testimonials
// ---------------------------------------------------------------------------

/// Create a manual testimonial. Rating defaults to 5.
pub async fn create_testimonial(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTestimonial>,
) -> AppResult<impl IntoResponse> {
    let rating = input.rating.unwrap_or(AUTO_RATING);
    validate_rating(rating)?;
    validate_quote(&input.quote)?;

    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(customer_not_found(input.customer_id))?;
    if let Some(service_id) = input.service_id {
        ResearchServiceRepo::find_by_id(&state.pool, service_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ResearchService",
                id: service_id,
            }))?;
    }

    let testimonial = TestimonialRepo::create_manual(&state.pool, &input, rating).await?;

    tracing::info!(
        testimonial_id = testimonial.id,
        customer_id = testimonial.customer_id,
        "Testimonial created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

// ---------------------------------------------------------------------------
// PUT /staff/testimonials/{id}
// ---------------------------------------------------------------------------

/// Publish, unpublish, feature, or unfeature a testimonial.
pub async fn update_flags(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTestimonialFlags>,
) -> AppResult<Json<DataResponse<Testimonial>>> {
    let testimonial = TestimonialRepo::update_flags(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Testimonial",
            id,
        }))?;

    tracing::info!(
        testimonial_id = id,
        is_published = testimonial.is_published,
        is_featured = testimonial.is_featured,
        "Testimonial flags updated",
    );

    Ok(Json(DataResponse { data: testimonial }))
}
