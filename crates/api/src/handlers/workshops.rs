//! Handlers for workshops.
//!
//! Public endpoints list workshops with seat availability and accept
//! registrations. Staff endpoints create and edit workshops and list who has
//! registered.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use writinghub_core::catalog::slugify;
use writinghub_core::error::CoreError;
use writinghub_core::registration::is_full;
use writinghub_core::search::{clamp_limit, clamp_offset};
use writinghub_core::types::DbId;
use writinghub_core::workshop::{
    is_upcoming, validate_capacity, validate_meeting_url, validate_price, validate_title,
};
use writinghub_db::models::workshop::{
    CreateWorkshop, RegistrationWithCustomer, UpdateWorkshop, Workshop, WorkshopListParams,
    WorkshopRegistration, WorkshopWithCount, ZoomAppointment,
};
use writinghub_db::repositories::{
    WorkshopRegistrationRepo, WorkshopRepo, ZoomAppointmentRepo,
};

use crate::engine::registration::{self, RegistrationOutcome};
use crate::error::{AppError, AppResult};
use crate::handlers::contact::resolve_customer;
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// A workshop with seat availability.
#[derive(Debug, Serialize)]
pub struct WorkshopView {
    #[serde(flatten)]
    pub workshop: Workshop,
    pub registered_count: i64,
    pub is_full: bool,
    pub is_upcoming: bool,
    /// `None` when the workshop has no capacity limit.
    pub spots_left: Option<i64>,
}

impl From<WorkshopWithCount> for WorkshopView {
    fn from(row: WorkshopWithCount) -> Self {
        let max = row.workshop.max_participants;
        let count = row.registered_count;
        Self {
            is_full: is_full(count, max),
            is_upcoming: is_upcoming(row.workshop.scheduled_at, Utc::now()),
            spots_left: max.map(|m| (i64::from(m) - count).max(0)),
            registered_count: count,
            workshop: row.workshop,
        }
    }
}

/// Workshop detail, including the meeting for online workshops.
#[derive(Debug, Serialize)]
pub struct WorkshopDetail {
    #[serde(flatten)]
    pub workshop: WorkshopView,
    pub zoom: Option<ZoomAppointment>,
}

/// Body of a public registration.
#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requirements: Option<String>,
}

/// Registration result. `already_registered` is `true` when the customer
/// had registered before and the existing registration is returned.
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub registration: WorkshopRegistration,
    pub already_registered: bool,
}

fn workshop_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Workshop",
        id,
    })
}

fn validate_workshop_fields(
    title: Option<&str>,
    max_participants: Option<i32>,
    price: Option<f64>,
    meeting_url: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    validate_capacity(max_participants)?;
    validate_price(price)?;
    if let Some(url) = meeting_url.filter(|u| !u.is_empty()) {
        validate_meeting_url(url)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /workshops
// ---------------------------------------------------------------------------

/// List active workshops. Inactive ones are never shown publicly.
pub async fn list_workshops(
    State(state): State<AppState>,
    Query(mut params): Query<WorkshopListParams>,
) -> AppResult<Json<DataResponse<Vec<WorkshopView>>>> {
    params.include_inactive = Some(false);
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let rows = WorkshopRepo::list_with_counts(&state.pool, &params, limit, offset).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(WorkshopView::from).collect(),
    }))
}

// ---------------------------------------------------------------------------
// GET /workshops/{id}
// ---------------------------------------------------------------------------

pub async fn get_workshop(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkshopDetail>>> {
    let row = WorkshopRepo::find_with_count(&state.pool, id)
        .await?
        .filter(|w| w.workshop.is_active)
        .ok_or(workshop_not_found(id))?;

    let zoom = if row.workshop.is_online {
        ZoomAppointmentRepo::find_active_for_workshop(&state.pool, id).await?
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: WorkshopDetail {
            workshop: WorkshopView::from(row),
            zoom,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /workshops/{id}/register
// ---------------------------------------------------------------------------

/// Register a visitor for a workshop.
///
/// Responds 201 for a new registration and 200 with
/// `already_registered: true` when the visitor was registered before.
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RegistrationForm>,
) -> AppResult<impl IntoResponse> {
    // No customer is recorded for a workshop that cannot be registered for.
    WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|w| w.is_active)
        .ok_or(workshop_not_found(id))?;

    let customer = resolve_customer(
        &state.pool,
        &input.email,
        &input.full_name,
        input.phone.as_deref(),
    )
    .await?;

    let special_requirements = input
        .special_requirements
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let outcome =
        registration::register(&state.pool, id, customer.id, special_requirements).await?;

    let status = match outcome {
        RegistrationOutcome::Created(_) => StatusCode::CREATED,
        RegistrationOutcome::AlreadyRegistered(_) => StatusCode::OK,
    };
    let already_registered = outcome.is_already_registered();

    Ok((
        status,
        Json(DataResponse {
            data: RegistrationResponse {
                registration: outcome.into_registration(),
                already_registered,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /staff/workshops
// ---------------------------------------------------------------------------

pub async fn list_all_workshops(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(mut params): Query<WorkshopListParams>,
) -> AppResult<Json<DataResponse<Vec<WorkshopView>>>> {
    params.include_inactive = Some(params.include_inactive.unwrap_or(true));
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let rows = WorkshopRepo::list_with_counts(&state.pool, &params, limit, offset).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(WorkshopView::from).collect(),
    }))
}

// ---------------------------------------------------------------------------
// POST /staff/workshops
// ---------------------------------------------------------------------------

pub async fn create_workshop(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkshop>,
) -> AppResult<impl IntoResponse> {
    validate_workshop_fields(
        Some(&input.title),
        input.max_participants,
        input.price,
        input.meeting_url.as_deref(),
    )?;

    // Titles repeat across sessions, so a slug is only stored when given.
    let slug = input.slug.as_deref().map(slugify);
    if slug.as_deref() == Some("") {
        return Err(AppError::BadRequest(
            "Workshop slug must contain letters or digits".into(),
        ));
    }

    let workshop = WorkshopRepo::create(&state.pool, &input, slug.as_deref()).await?;

    tracing::info!(
        workshop_id = workshop.id,
        scheduled_at = %workshop.scheduled_at,
        "Workshop created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: workshop })))
}

// ---------------------------------------------------------------------------
// PUT /staff/workshops/{id}
// ---------------------------------------------------------------------------

pub async fn update_workshop(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkshop>,
) -> AppResult<Json<DataResponse<Workshop>>> {
    validate_workshop_fields(
        input.title.as_deref(),
        input.max_participants.flatten(),
        input.price,
        input.meeting_url.as_deref(),
    )?;

    let workshop = WorkshopRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(workshop_not_found(id))?;

    tracing::info!(workshop_id = id, "Workshop updated");

    Ok(Json(DataResponse { data: workshop }))
}

// ---------------------------------------------------------------------------
// DELETE /staff/workshops/{id}
// ---------------------------------------------------------------------------

/// Delete a workshop together with its registrations and appointment.
pub async fn delete_workshop(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WorkshopRepo::delete(&state.pool, id).await? {
        return Err(workshop_not_found(id));
    }
    tracing::info!(workshop_id = id, "Workshop deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /staff/workshops/{id}/registrations
// ---------------------------------------------------------------------------

pub async fn list_registrations(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RegistrationWithCustomer>>>> {
    WorkshopRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(workshop_not_found(id))?;

    let registrations = WorkshopRegistrationRepo::list_for_workshop(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}
