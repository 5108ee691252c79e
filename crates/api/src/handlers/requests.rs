//! Staff handlers for service requests.
//!
//! Status changes go through [`engine::lifecycle`]; the edit endpoint only
//! touches notes, assignee, deadline, and budget. Each status change leaves
//! a `service_update` notification for the customer.
//!
//! [`engine::lifecycle`]: crate::engine::lifecycle

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use writinghub_core::error::CoreError;
use writinghub_core::notification::NotificationType;
use writinghub_core::search::{clamp_limit, clamp_offset};
use writinghub_core::service_request::{
    days_until_deadline, is_overdue, validate_budget, RequestAction,
};
use writinghub_core::types::DbId;
use writinghub_db::models::notification::CreateNotification;
use writinghub_db::models::service_request::{
    ServiceRequest, ServiceRequestListParams, UpdateServiceRequest,
};
use writinghub_db::repositories::{NotificationRepo, ServiceRequestRepo};
use writinghub_db::DbPool;

use crate::engine::lifecycle;
use crate::error::{AppError, AppResult};
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// A request with its deadline-derived fields.
#[derive(Debug, Serialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: ServiceRequest,
    pub is_overdue: bool,
    pub days_until_deadline: Option<i64>,
}

impl From<ServiceRequest> for RequestView {
    fn from(request: ServiceRequest) -> Self {
        let now = Utc::now();
        Self {
            is_overdue: is_overdue(request.deadline, request.status, now),
            days_until_deadline: days_until_deadline(request.deadline, now),
            request,
        }
    }
}

fn request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ServiceRequest",
        id,
    })
}

/// Tell the customer their request changed status. Failures are logged; the
/// transition has already been committed.
async fn notify_status_change(pool: &DbPool, request: &ServiceRequest) {
    let input = CreateNotification {
        customer_id: request.customer_id,
        notification_type: NotificationType::ServiceUpdate,
        title: format!("Request update: {}", request.title),
        message: format!(
            "Your request \"{}\" is now {}.",
            request.title,
            request.status.as_str().replace('_', " ")
        ),
        link: None,
    };
    if let Err(e) = NotificationRepo::create(pool, &input).await {
        tracing::warn!(
            request_id = request.id,
            error = %e,
            "Failed to record service update notification",
        );
    }
}

// ---------------------------------------------------------------------------
// GET /staff/requests
// ---------------------------------------------------------------------------

/// List requests, optionally filtered by `status` and `customer_id`.
pub async fn list_requests(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ServiceRequestListParams>,
) -> AppResult<Json<DataResponse<Vec<RequestView>>>> {
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let requests = ServiceRequestRepo::list_filtered(&state.pool, &params, limit, offset).await?;
    Ok(Json(DataResponse {
        data: requests.into_iter().map(RequestView::from).collect(),
    }))
}

// ---------------------------------------------------------------------------
// GET /staff/requests/{id}
// ---------------------------------------------------------------------------

pub async fn get_request(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RequestView>>> {
    let request = ServiceRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(request_not_found(id))?;
    Ok(Json(DataResponse {
        data: RequestView::from(request),
    }))
}

// ---------------------------------------------------------------------------
// PUT /staff/requests/{id}
// ---------------------------------------------------------------------------

/// Edit notes, assignee, deadline, or budget. Status is not editable here.
pub async fn update_request(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateServiceRequest>,
) -> AppResult<Json<DataResponse<RequestView>>> {
    validate_budget(input.budget)?;

    let request = ServiceRequestRepo::update_details(&state.pool, id, &input)
        .await?
        .ok_or(request_not_found(id))?;

    tracing::info!(request_id = id, "Service request details updated");

    Ok(Json(DataResponse {
        data: RequestView::from(request),
    }))
}

// ---------------------------------------------------------------------------
// POST /staff/requests/{id}/{action}
// ---------------------------------------------------------------------------

/// Apply `accept`, `start`, `complete`, or `cancel` to a request.
pub async fn request_action(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path((id, action)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<RequestView>>> {
    let action = RequestAction::from_route(&action)?;
    let updated = lifecycle::apply(&state.pool, id, action).await?;

    notify_status_change(&state.pool, &updated).await;

    Ok(Json(DataResponse {
        data: RequestView::from(updated),
    }))
}
