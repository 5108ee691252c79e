//! Handlers for consultancy services.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use writinghub_core::catalog::{split_features, validate_name, validate_price_range};
use writinghub_core::error::CoreError;
use writinghub_core::types::DbId;
use writinghub_db::models::service::{
    ConsultancyService, CreateConsultancyService, UpdateConsultancyService,
};
use writinghub_db::repositories::ConsultancyServiceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::catalog_slug;
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// A consultancy service with its features as a list.
#[derive(Debug, Serialize)]
pub struct ConsultancyView {
    #[serde(flatten)]
    pub service: ConsultancyService,
    pub feature_list: Vec<String>,
}

impl From<ConsultancyService> for ConsultancyView {
    fn from(service: ConsultancyService) -> Self {
        let feature_list = split_features(&service.features);
        Self {
            service,
            feature_list,
        }
    }
}

fn consultancy_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ConsultancyService",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /consultancy
// ---------------------------------------------------------------------------

pub async fn list_consultancy(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ConsultancyView>>>> {
    let services = ConsultancyServiceRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse {
        data: services.into_iter().map(ConsultancyView::from).collect(),
    }))
}

// ---------------------------------------------------------------------------
// POST /staff/consultancy
// ---------------------------------------------------------------------------

pub async fn create_consultancy(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateConsultancyService>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_price_range(input.hourly_rate, None)?;

    let pool = &state.pool;
    let slug = catalog_slug(input.slug.as_deref(), &input.name, |candidate| async move {
        ConsultancyServiceRepo::slug_exists(pool, &candidate).await
    })
    .await?;

    let service = ConsultancyServiceRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(consultancy_service_id = service.id, "Consultancy service created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ConsultancyView::from(service),
        }),
    ))
}

// ---------------------------------------------------------------------------
// PUT /staff/consultancy/{id}
// ---------------------------------------------------------------------------

pub async fn update_consultancy(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConsultancyService>,
) -> AppResult<Json<DataResponse<ConsultancyView>>> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    validate_price_range(input.hourly_rate, None)?;

    let service = ConsultancyServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(consultancy_not_found(id))?;

    tracing::info!(consultancy_service_id = id, "Consultancy service updated");

    Ok(Json(DataResponse {
        data: ConsultancyView::from(service),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /staff/consultancy/{id}
// ---------------------------------------------------------------------------

/// Delete a consultancy service. Appointments that referenced it stay, with
/// no service attached.
pub async fn delete_consultancy(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ConsultancyServiceRepo::delete(&state.pool, id).await? {
        return Err(consultancy_not_found(id));
    }
    tracing::info!(consultancy_service_id = id, "Consultancy service deleted");
    Ok(StatusCode::NO_CONTENT)
}
