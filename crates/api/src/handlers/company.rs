//! Handler for the public company profile.

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Serialize;
use writinghub_core::company::CompanyProfile;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Company profile plus values derived from it.
#[derive(Debug, Serialize)]
pub struct CompanyView {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    pub years_in_operation: i32,
}

// ---------------------------------------------------------------------------
// GET /company
// ---------------------------------------------------------------------------

pub async fn get_company(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CompanyView>>> {
    let profile = state.company.as_ref().clone();
    let years_in_operation = profile.years_in_operation(Utc::now().year());
    Ok(Json(DataResponse {
        data: CompanyView {
            profile,
            years_in_operation,
        },
    }))
}
