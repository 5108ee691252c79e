//! Staff handlers for customers.
//!
//! Customers are created by public contact points, never deleted; staff edit
//! details and toggle `is_active`.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use writinghub_core::customer::{normalize_email, validate_full_name, validate_phone};
use writinghub_core::error::CoreError;
use writinghub_core::search::{clamp_limit, clamp_offset};
use writinghub_core::types::DbId;
use writinghub_db::models::customer::{Customer, CustomerListParams, UpdateCustomer};
use writinghub_db::models::service_request::{ServiceRequest, ServiceRequestListParams};
use writinghub_db::repositories::{CustomerRepo, ServiceRequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Requests shown on the customer detail page.
const DETAIL_REQUEST_LIMIT: i64 = 50;

#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub requests: Vec<ServiceRequest>,
}

pub(crate) fn customer_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /staff/customers
// ---------------------------------------------------------------------------

/// List customers, or look one up with `?email=`.
pub async fn list_customers(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<DataResponse<Vec<Customer>>>> {
    if let Some(email) = params.email.as_deref() {
        let found = CustomerRepo::find_by_email(&state.pool, &normalize_email(email)).await?;
        return Ok(Json(DataResponse {
            data: found.into_iter().collect(),
        }));
    }

    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);
    let customers = CustomerRepo::list(&state.pool, &params, limit, offset).await?;
    Ok(Json(DataResponse { data: customers }))
}

// ---------------------------------------------------------------------------
// GET /staff/customers/{id}
// ---------------------------------------------------------------------------

pub async fn get_customer(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CustomerDetail>>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(customer_not_found(id))?;

    let params = ServiceRequestListParams {
        customer_id: Some(id),
        ..Default::default()
    };
    let requests =
        ServiceRequestRepo::list_filtered(&state.pool, &params, DETAIL_REQUEST_LIMIT, 0).await?;

    Ok(Json(DataResponse {
        data: CustomerDetail { customer, requests },
    }))
}

// ---------------------------------------------------------------------------
// PUT /staff/customers/{id}
// ---------------------------------------------------------------------------

pub async fn update_customer(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<Json<DataResponse<Customer>>> {
    if let Some(ref name) = input.full_name {
        validate_full_name(name)?;
    }
    validate_phone(input.phone.as_deref())?;

    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(customer_not_found(id))?;

    tracing::info!(customer_id = id, "Customer updated");

    Ok(Json(DataResponse { data: customer }))
}

// ---------------------------------------------------------------------------
// POST /staff/customers/{id}/toggle-active
// ---------------------------------------------------------------------------

pub async fn toggle_customer_active(
    _staff: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Customer>>> {
    let customer = CustomerRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or(customer_not_found(id))?;

    tracing::info!(
        customer_id = id,
        is_active = customer.is_active,
        "Customer active flag toggled",
    );

    Ok(Json(DataResponse { data: customer }))
}
