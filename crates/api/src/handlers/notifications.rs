//! Staff handlers for customer notifications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use writinghub_core::error::CoreError;
use writinghub_core::notification::validate_notification;
use writinghub_core::search::{clamp_limit, clamp_offset};
use writinghub_core::types::DbId;
use writinghub_db::models::notification::{
    CreateNotification, Notification, NotificationListParams,
};
use writinghub_db::repositories::{CustomerRepo, NotificationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::customers::customer_not_found;
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /staff/notifications
// ---------------------------------------------------------------------------

pub async fn create_notification(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    validate_notification(&input.title, &input.message)?;

    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(customer_not_found(input.customer_id))?;

    let notification = NotificationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        notification_id = notification.id,
        customer_id = notification.customer_id,
        notification_type = %notification.notification_type,
        "Notification created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}

// ---------------------------------------------------------------------------
// GET /staff/customers/{id}/notifications
// ---------------------------------------------------------------------------

pub async fn list_for_customer(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(customer_id): Path<DbId>,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);
    let items = NotificationRepo::list_for_customer(
        &state.pool,
        customer_id,
        params.unread_only.unwrap_or(false),
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /staff/customers/{id}/notifications/{notification_id}/read
// ---------------------------------------------------------------------------

pub async fn mark_read(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path((customer_id, notification_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::mark_read(&state.pool, notification_id, customer_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "UnreadNotification",
            id: notification_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
