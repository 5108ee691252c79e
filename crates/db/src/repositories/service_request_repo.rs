//! Repository for the `service_requests` table.

use sqlx::PgPool;
use writinghub_core::service_request::StatusChange;
use writinghub_core::types::DbId;

use crate::models::service_request::{
    CompletedRequestRow, CreateServiceRequest, ServiceRequest, ServiceRequestListParams,
    UpdateServiceRequest,
};

/// Column list for `service_requests` queries.
const COLUMNS: &str = "\
    id, customer_id, service_id, title, description, deadline, budget, \
    status, notes, assignee, created_at, updated_at, completed_at";

/// Provides CRUD operations for service requests.
///
/// Status is only written by [`ServiceRequestRepo::apply_status_change`].
pub struct ServiceRequestRepo;

impl ServiceRequestRepo {
    /// Insert a new `pending` request.
    pub async fn create(
        pool: &PgPool,
        input: &CreateServiceRequest,
    ) -> Result<ServiceRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_requests \
                (customer_id, service_id, title, description, deadline, budget) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(input.customer_id)
            .bind(input.service_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.deadline)
            .bind(input.budget)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ServiceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_requests WHERE id = $1");
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests with optional filters for status and customer.
    ///
    /// Results are ordered newest-first.
    pub async fn list_filtered(
        pool: &PgPool,
        params: &ServiceRequestListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if params.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if params.customer_id.is_some() {
            conditions.push(format!("customer_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM service_requests {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, ServiceRequest>(&query);

        if let Some(status) = params.status {
            q = q.bind(status.as_str());
        }
        if let Some(customer_id) = params.customer_id {
            q = q.bind(customer_id);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Apply staff edits to non-status fields. An explicit `null` assignee
    /// or deadline clears the column.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        input: &UpdateServiceRequest,
    ) -> Result<Option<ServiceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE service_requests SET
                notes = COALESCE($2, notes),
                assignee = CASE WHEN $3 THEN $4 ELSE assignee END,
                deadline = CASE WHEN $5 THEN $6 ELSE deadline END,
                budget = COALESCE($7, budget),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(&input.notes)
            .bind(input.assignee.is_some())
            .bind(input.assignee.as_ref().and_then(|a| a.as_deref()))
            .bind(input.deadline.is_some())
            .bind(input.deadline.flatten())
            .bind(input.budget)
            .fetch_optional(pool)
            .await
    }

    /// Persist a planned status change.
    ///
    /// The update only matches while the row is still in `change.from`, so
    /// `None` means the request is gone or another transition got there
    /// first.
    pub async fn apply_status_change(
        pool: &PgPool,
        id: DbId,
        change: &StatusChange,
    ) -> Result<Option<ServiceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE service_requests SET
                status = $3,
                completed_at = COALESCE($4, completed_at),
                updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRequest>(&query)
            .bind(id)
            .bind(change.from.as_str())
            .bind(change.to.as_str())
            .bind(change.completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Completed requests joined with their service name, oldest first.
    ///
    /// Requests whose service was removed come back with `service_id` NULL.
    pub async fn list_completed_with_service(
        pool: &PgPool,
    ) -> Result<Vec<CompletedRequestRow>, sqlx::Error> {
        sqlx::query_as::<_, CompletedRequestRow>(
            "SELECT r.customer_id, r.service_id, s.name AS service_name \
             FROM service_requests r \
             LEFT JOIN research_services s ON s.id = r.service_id \
             WHERE r.status = 'completed' \
             ORDER BY r.completed_at, r.id",
        )
        .fetch_all(pool)
        .await
    }
}
