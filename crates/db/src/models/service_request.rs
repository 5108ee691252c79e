//! Service request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use writinghub_core::service_request::RequestStatus;
use writinghub_core::testimonial::CompletedRequest;
use writinghub_core::types::{DbId, Timestamp};

use super::nullable;

/// A row from the `service_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRequest {
    pub id: DbId,
    pub customer_id: DbId,
    pub service_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub deadline: Option<Timestamp>,
    pub budget: Option<f64>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub notes: String,
    pub assignee: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Values for inserting a new request. New requests always start `pending`.
#[derive(Debug, Clone)]
pub struct CreateServiceRequest {
    pub customer_id: DbId,
    pub service_id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub deadline: Option<Timestamp>,
    pub budget: Option<f64>,
}

/// DTO for staff edits to a request.
///
/// Carries no status field; status only changes through
/// `ServiceRequestRepo::apply_status_change`. `assignee` and `deadline` are
/// cleared by sending `null`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceRequest {
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub assignee: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub deadline: Option<Option<Timestamp>>,
    pub budget: Option<f64>,
}

/// Query parameters for listing requests.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceRequestListParams {
    pub status: Option<RequestStatus>,
    pub customer_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A completed request joined with its (possibly removed) service.
#[derive(Debug, Clone, FromRow)]
pub struct CompletedRequestRow {
    pub customer_id: DbId,
    pub service_id: Option<DbId>,
    pub service_name: Option<String>,
}

impl From<CompletedRequestRow> for CompletedRequest {
    fn from(row: CompletedRequestRow) -> Self {
        CompletedRequest {
            customer_id: row.customer_id,
            service_id: row.service_id,
            service_name: row.service_name,
        }
    }
}
