//! Staff actions on workshop registrations.

use axum::extract::{Path, State};
use axum::Json;

use writinghub_core::registration::RegistrationAction;
use writinghub_core::types::DbId;
use writinghub_db::models::workshop::WorkshopRegistration;

use crate::engine::registration;
use crate::error::AppResult;
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /staff/registrations/{id}/{action}
// ---------------------------------------------------------------------------

/// Apply `attend`, `cancel`, or `no-show` to a registration.
pub async fn registration_action(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path((id, action)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<WorkshopRegistration>>> {
    let action = RegistrationAction::from_route(&action)?;
    let updated = registration::apply(&state.pool, id, action).await?;
    Ok(Json(DataResponse { data: updated }))
}
