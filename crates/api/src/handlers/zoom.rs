//! Staff handlers for zoom appointments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use writinghub_core::error::CoreError;
use writinghub_core::types::DbId;
use writinghub_core::workshop::validate_meeting_url;
use writinghub_db::models::workshop::{
    CreateZoomAppointment, UpdateZoomAppointment, ZoomAppointment,
};
use writinghub_db::repositories::{ConsultancyServiceRepo, WorkshopRepo, ZoomAppointmentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

fn appointment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ZoomAppointment",
        id,
    })
}

/// Check that the workshop and consultancy service an appointment links to
/// exist.
async fn ensure_links_exist(
    state: &AppState,
    workshop_id: Option<DbId>,
    consultancy_service_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = workshop_id {
        WorkshopRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Workshop",
                id,
            })?;
    }
    if let Some(id) = consultancy_service_id {
        ConsultancyServiceRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ConsultancyService",
                id,
            })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /staff/zoom
// ---------------------------------------------------------------------------

pub async fn list_appointments(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ZoomAppointment>>>> {
    let items = ZoomAppointmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /staff/zoom
// ---------------------------------------------------------------------------

/// Create an appointment. A workshop can have at most one.
pub async fn create_appointment(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateZoomAppointment>,
) -> AppResult<impl IntoResponse> {
    validate_meeting_url(&input.zoom_link)?;
    ensure_links_exist(&state, input.workshop_id, input.consultancy_service_id).await?;

    let appointment = ZoomAppointmentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        zoom_appointment_id = appointment.id,
        workshop_id = ?appointment.workshop_id,
        "Zoom appointment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: appointment })))
}

// ---------------------------------------------------------------------------
// POST /staff/zoom/{id}/toggle
// ---------------------------------------------------------------------------

pub async fn toggle_appointment(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ZoomAppointment>>> {
    let appointment = ZoomAppointmentRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or(appointment_not_found(id))?;
    Ok(Json(DataResponse { data: appointment }))
}

// ---------------------------------------------------------------------------
// PUT /staff/zoom/{id}
// ---------------------------------------------------------------------------

pub async fn update_appointment(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateZoomAppointment>,
) -> AppResult<Json<DataResponse<ZoomAppointment>>> {
    if let Some(ref link) = input.zoom_link {
        validate_meeting_url(link)?;
    }

    let appointment = ZoomAppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(appointment_not_found(id))?;

    tracing::info!(zoom_appointment_id = id, "Zoom appointment updated");

    Ok(Json(DataResponse { data: appointment }))
}

// ---------------------------------------------------------------------------
// DELETE /staff/zoom/{id}
// ---------------------------------------------------------------------------

pub async fn delete_appointment(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ZoomAppointmentRepo::delete(&state.pool, id).await? {
        return Err(appointment_not_found(id));
    }
    tracing::info!(zoom_appointment_id = id, "Zoom appointment deleted");
    Ok(StatusCode::NO_CONTENT)
}
