//! Testimonial entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use writinghub_core::types::{DbId, Timestamp};

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub customer_id: DbId,
    pub service_id: Option<DbId>,
    pub rating: i16,
    pub quote: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub is_auto_generated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A published testimonial joined with display names for public pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublishedTestimonial {
    pub id: DbId,
    pub customer_name: String,
    pub organization: String,
    pub service_id: Option<DbId>,
    pub service_name: Option<String>,
    pub rating: i16,
    pub quote: String,
    pub is_featured: bool,
    pub created_at: Timestamp,
}

/// DTO for a staff-entered testimonial.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub customer_id: DbId,
    pub service_id: Option<DbId>,
    pub rating: Option<i16>,
    pub quote: String,
    pub is_published: Option<bool>,
}

/// DTO for moderating a testimonial.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTestimonialFlags {
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Query parameters for public testimonial listings.
#[derive(Debug, Default, Deserialize)]
pub struct TestimonialListParams {
    pub service_id: Option<DbId>,
    pub featured_only: Option<bool>,
    pub limit: Option<i64>,
}
