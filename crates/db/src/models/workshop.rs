//! Workshop, registration, and zoom appointment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use writinghub_core::registration::RegistrationStatus;
use writinghub_core::types::{DbId, Timestamp};

use super::nullable;

/// A row from the `workshops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workshop {
    pub id: DbId,
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub detailed_description: String,
    pub scheduled_at: Timestamp,
    pub location: String,
    pub is_online: bool,
    pub meeting_url: String,
    pub max_participants: Option<i32>,
    pub facilitator: Option<String>,
    pub price: Option<f64>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A workshop together with its count of seat-holding registrations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkshopWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub workshop: Workshop,
    pub registered_count: i64,
}

/// DTO for creating a workshop.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkshop {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub detailed_description: Option<String>,
    pub scheduled_at: Timestamp,
    pub location: Option<String>,
    pub is_online: Option<bool>,
    pub meeting_url: Option<String>,
    pub max_participants: Option<i32>,
    pub facilitator: Option<String>,
    pub price: Option<f64>,
}

/// DTO for updating a workshop. `None` leaves a field unchanged; a `null`
/// `max_participants` removes the capacity limit.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkshop {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub location: Option<String>,
    pub is_online: Option<bool>,
    pub meeting_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub max_participants: Option<Option<i32>>,
    pub facilitator: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

/// Query parameters for listing workshops.
#[derive(Debug, Default, Deserialize)]
pub struct WorkshopListParams {
    /// Only workshops scheduled in the future.
    pub upcoming: Option<bool>,
    pub include_inactive: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A row from the `workshop_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkshopRegistration {
    pub id: DbId,
    pub workshop_id: DbId,
    pub customer_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: RegistrationStatus,
    pub registered_at: Timestamp,
    pub attended_at: Option<Timestamp>,
    pub special_requirements: String,
}

/// A registration joined with the registrant's name and email, for staff lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationWithCustomer {
    pub id: DbId,
    pub workshop_id: DbId,
    pub customer_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: RegistrationStatus,
    pub registered_at: Timestamp,
    pub attended_at: Option<Timestamp>,
    pub special_requirements: String,
    pub full_name: String,
    pub email: String,
}

/// A row from the `zoom_appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ZoomAppointment {
    pub id: DbId,
    pub workshop_id: Option<DbId>,
    pub consultancy_service_id: Option<DbId>,
    pub zoom_link: String,
    pub meeting_id: String,
    pub passcode: String,
    pub start_time: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a zoom appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateZoomAppointment {
    pub workshop_id: Option<DbId>,
    pub consultancy_service_id: Option<DbId>,
    pub zoom_link: String,
    pub meeting_id: Option<String>,
    pub passcode: Option<String>,
    pub start_time: Timestamp,
}

/// DTO for updating a zoom appointment. `None` leaves a field unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateZoomAppointment {
    pub zoom_link: Option<String>,
    pub meeting_id: Option<String>,
    pub passcode: Option<String>,
    pub start_time: Option<Timestamp>,
    pub is_active: Option<bool>,
}
