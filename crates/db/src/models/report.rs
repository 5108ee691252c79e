//! Aggregate rows for the staff reports page.

use serde::Serialize;
use sqlx::FromRow;
use writinghub_core::types::DbId;

/// Number of requests per status literal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// A research service ranked by how many requests reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRequestCount {
    pub service_id: DbId,
    pub name: String,
    pub request_count: i64,
}

/// Headline counts for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct MonthlyCounts {
    pub new_customers: i64,
    pub new_requests: i64,
    pub completed_requests: i64,
    pub workshop_attendees: i64,
}

/// All-time headline totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct Totals {
    pub customers: i64,
    pub active_customers: i64,
    pub requests: i64,
    pub completed_requests: i64,
    pub upcoming_workshops: i64,
    pub published_testimonials: i64,
}

/// Number of customers of one type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SegmentCount {
    pub customer_type: String,
    pub count: i64,
}
