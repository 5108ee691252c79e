//! Request Lifecycle Engine.
//!
//! The only path that changes a service request's status.

use chrono::Utc;
use sqlx::PgPool;
use writinghub_core::error::CoreError;
use writinghub_core::service_request::{plan_transition, RequestAction};
use writinghub_core::types::DbId;
use writinghub_db::models::service_request::ServiceRequest;
use writinghub_db::repositories::ServiceRequestRepo;

use crate::error::{AppError, AppResult};

/// Apply `action` to the request with the given id.
///
/// Fails with `NotFound` if the request does not exist and with
/// `InvalidTransition` if the action is not allowed from its current status,
/// including when a concurrent transition changed the status first.
pub async fn apply(pool: &PgPool, id: DbId, action: RequestAction) -> AppResult<ServiceRequest> {
    let request = ServiceRequestRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ServiceRequest",
            id,
        }))?;

    let change = plan_transition(request.status, action, Utc::now())?;

    let updated = ServiceRequestRepo::apply_status_change(pool, id, &change)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidTransition {
            entity: "service request",
            from: change.from.as_str(),
            action: action.verb(),
        }))?;

    tracing::info!(
        request_id = id,
        customer_id = updated.customer_id,
        from = %change.from,
        to = %change.to,
        "Service request status changed",
    );

    Ok(updated)
}
