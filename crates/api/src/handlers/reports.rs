//! Staff reports: totals, this month against last month, and breakdowns.

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, TimeZone, Utc};
use serde::Serialize;

use writinghub_core::reports::{percent_change, previous_month, share};
use writinghub_core::types::Timestamp;
use writinghub_db::models::report::{MonthlyCounts, ServiceRequestCount, StatusCount, Totals};
use writinghub_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::staff::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Services listed in the top-services table.
const TOP_SERVICES: i64 = 5;

/// Month-to-date activity, last month's activity, and the change in percent.
#[derive(Debug, Serialize)]
pub struct MonthComparison {
    pub current: MonthlyCounts,
    pub previous: MonthlyCounts,
    pub new_customers_change: f64,
    pub new_requests_change: f64,
    pub completed_requests_change: f64,
    pub workshop_attendees_change: f64,
}

#[derive(Debug, Serialize)]
pub struct Segment {
    pub customer_type: String,
    pub count: i64,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub totals: Totals,
    pub month: MonthComparison,
    pub customer_segments: Vec<Segment>,
    pub status_distribution: Vec<StatusCount>,
    pub top_services: Vec<ServiceRequestCount>,
}

fn month_start(year: i32, month: u32) -> AppResult<Timestamp> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalError(format!("Invalid month {year}-{month}")))
}

// ---------------------------------------------------------------------------
// GET /staff/reports
// ---------------------------------------------------------------------------

pub async fn get_reports(
    _staff: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ReportSummary>>> {
    let now = Utc::now();
    let current_start = month_start(now.year(), now.month())?;
    let (prev_year, prev_month) = previous_month(now.year(), now.month());
    let previous_start = month_start(prev_year, prev_month)?;

    let totals = ReportRepo::totals(&state.pool).await?;
    let current = ReportRepo::monthly_counts(&state.pool, current_start, now).await?;
    let previous = ReportRepo::monthly_counts(&state.pool, previous_start, current_start).await?;

    let segments = ReportRepo::customer_segments(&state.pool).await?;
    let segment_total: i64 = segments.iter().map(|s| s.count).sum();
    let customer_segments = segments
        .into_iter()
        .map(|s| Segment {
            percent: share(s.count, segment_total),
            customer_type: s.customer_type,
            count: s.count,
        })
        .collect();

    let status_distribution = ReportRepo::status_distribution(&state.pool).await?;
    let top_services = ReportRepo::top_services(&state.pool, TOP_SERVICES).await?;

    Ok(Json(DataResponse {
        data: ReportSummary {
            totals,
            month: MonthComparison {
                new_customers_change: percent_change(current.new_customers, previous.new_customers),
                new_requests_change: percent_change(current.new_requests, previous.new_requests),
                completed_requests_change: percent_change(
                    current.completed_requests,
                    previous.completed_requests,
                ),
                workshop_attendees_change: percent_change(
                    current.workshop_attendees,
                    previous.workshop_attendees,
                ),
                current,
                previous,
            },
            customer_segments,
            status_distribution,
            top_services,
        },
    }))
}
