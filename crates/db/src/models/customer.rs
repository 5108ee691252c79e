//! Customer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use writinghub_core::customer::CustomerType;
use writinghub_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub organization: String,
    #[sqlx(try_from = "String")]
    pub customer_type: CustomerType,
    pub is_active: bool,
    pub notes: String,
    pub registration_date: Timestamp,
    pub last_contact: Option<Timestamp>,
}

/// Identity details captured whenever a visitor contacts the company.
///
/// `email` must already be normalized.
#[derive(Debug, Clone)]
pub struct ContactDetails {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
}

/// DTO for staff edits to a customer. `None` leaves a field unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomer {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub notes: Option<String>,
}

/// Query parameters for listing customers.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListParams {
    /// Exact email lookup; when set, the other filters are ignored.
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
