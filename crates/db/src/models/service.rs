//! Research and consultancy service models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use writinghub_core::catalog::{ConsultancyType, ResearchCategory};
use writinghub_core::types::{DbId, Timestamp};

/// A row from the `research_services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResearchService {
    pub id: DbId,
    pub name: String,
    pub slug: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: ResearchCategory,
    pub description: String,
    pub detailed_description: String,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub turnaround_time: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a research service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResearchService {
    pub name: String,
    pub slug: Option<String>,
    pub category: ResearchCategory,
    pub description: String,
    pub detailed_description: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub turnaround_time: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a research service. `None` leaves a field unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateResearchService {
    pub name: Option<String>,
    pub category: Option<ResearchCategory>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub turnaround_time: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A row from the `consultancy_services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConsultancyService {
    pub id: DbId,
    pub name: String,
    pub slug: Option<String>,
    #[sqlx(try_from = "String")]
    pub consultancy_type: ConsultancyType,
    pub description: String,
    pub detailed_description: String,
    pub features: String,
    pub hourly_rate: Option<f64>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a consultancy service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsultancyService {
    pub name: String,
    pub slug: Option<String>,
    pub consultancy_type: ConsultancyType,
    pub description: String,
    pub detailed_description: Option<String>,
    pub features: Option<String>,
    pub hourly_rate: Option<f64>,
    pub display_order: Option<i32>,
}

/// DTO for updating a consultancy service. `None` leaves a field unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateConsultancyService {
    pub name: Option<String>,
    pub consultancy_type: Option<ConsultancyType>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub features: Option<String>,
    pub hourly_rate: Option<f64>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
