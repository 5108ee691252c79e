//! Handler for the public contact form.
//!
//! Every submission creates (or refreshes) the customer by email and opens a
//! `pending` service request holding the message.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use writinghub_core::customer::{normalize_email, validate_email, validate_full_name, validate_phone};
use writinghub_core::service_request::validate_new_request;
use writinghub_core::types::DbId;
use writinghub_db::models::customer::{ContactDetails, Customer};
use writinghub_db::models::service_request::CreateServiceRequest;
use writinghub_db::repositories::{CustomerRepo, ResearchServiceRepo, ServiceRequestRepo};
use writinghub_db::DbPool;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of a contact form submission.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Service the visitor asked about. Unknown ids are ignored.
    pub service_id: Option<DbId>,
}

/// Validate visitor-supplied identity and get-or-create the customer.
pub(crate) async fn resolve_customer(
    pool: &DbPool,
    email: &str,
    full_name: &str,
    phone: Option<&str>,
) -> AppResult<Customer> {
    let email = normalize_email(email);
    validate_email(&email)?;
    validate_full_name(full_name)?;
    validate_phone(phone)?;

    let contact = ContactDetails {
        email,
        full_name: full_name.trim().to_string(),
        phone: phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
    };
    Ok(CustomerRepo::upsert_contact(pool, &contact).await?)
}

// ---------------------------------------------------------------------------
// POST /contact
// ---------------------------------------------------------------------------

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactForm>,
) -> AppResult<impl IntoResponse> {
    validate_new_request(&input.subject, &input.message)?;

    let customer = resolve_customer(
        &state.pool,
        &input.email,
        &input.full_name,
        input.phone.as_deref(),
    )
    .await?;

    let service_id = match input.service_id {
        Some(id) => ResearchServiceRepo::find_by_id(&state.pool, id)
            .await?
            .map(|s| s.id),
        None => None,
    };

    let request = ServiceRequestRepo::create(
        &state.pool,
        &CreateServiceRequest {
            customer_id: customer.id,
            service_id,
            title: input.subject.trim().to_string(),
            description: input.message,
            deadline: None,
            budget: None,
        },
    )
    .await?;

    tracing::info!(
        request_id = request.id,
        customer_id = customer.id,
        service_id = ?service_id,
        "Contact form submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}
