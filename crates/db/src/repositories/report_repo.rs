//! Aggregate queries for the staff reports page.

use sqlx::PgPool;
use writinghub_core::types::Timestamp;

use crate::models::report::{MonthlyCounts, SegmentCount, ServiceRequestCount, StatusCount, Totals};

pub struct ReportRepo;

impl ReportRepo {
    pub async fn totals(pool: &PgPool) -> Result<Totals, sqlx::Error> {
        sqlx::query_as::<_, Totals>(
            "SELECT \
                (SELECT COUNT(*) FROM customers) AS customers, \
                (SELECT COUNT(*) FROM customers WHERE is_active) AS active_customers, \
                (SELECT COUNT(*) FROM service_requests) AS requests, \
                (SELECT COUNT(*) FROM service_requests WHERE status = 'completed') \
                    AS completed_requests, \
                (SELECT COUNT(*) FROM workshops WHERE is_active AND scheduled_at > NOW()) \
                    AS upcoming_workshops, \
                (SELECT COUNT(*) FROM testimonials WHERE is_published) \
                    AS published_testimonials",
        )
        .fetch_one(pool)
        .await
    }

    /// Counts of activity in `[start, end)`.
    pub async fn monthly_counts(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<MonthlyCounts, sqlx::Error> {
        sqlx::query_as::<_, MonthlyCounts>(
            "SELECT \
                (SELECT COUNT(*) FROM customers \
                 WHERE registration_date >= $1 AND registration_date < $2) AS new_customers, \
                (SELECT COUNT(*) FROM service_requests \
                 WHERE created_at >= $1 AND created_at < $2) AS new_requests, \
                (SELECT COUNT(*) FROM service_requests \
                 WHERE completed_at >= $1 AND completed_at < $2) AS completed_requests, \
                (SELECT COUNT(*) FROM workshop_registrations \
                 WHERE attended_at >= $1 AND attended_at < $2) AS workshop_attendees",
        )
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }

    pub async fn status_distribution(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM service_requests \
             GROUP BY status ORDER BY count DESC, status",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn customer_segments(pool: &PgPool) -> Result<Vec<SegmentCount>, sqlx::Error> {
        sqlx::query_as::<_, SegmentCount>(
            "SELECT customer_type, COUNT(*) AS count FROM customers \
             GROUP BY customer_type ORDER BY count DESC, customer_type",
        )
        .fetch_all(pool)
        .await
    }

    /// Research services with the most requests.
    pub async fn top_services(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ServiceRequestCount>, sqlx::Error> {
        sqlx::query_as::<_, ServiceRequestCount>(
            "SELECT s.id AS service_id, s.name, COUNT(r.id) AS request_count \
             FROM research_services s \
             JOIN service_requests r ON r.service_id = s.id \
             GROUP BY s.id, s.name \
             ORDER BY request_count DESC, s.name \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
