//! Repository for the `workshop_registrations` table.

use sqlx::{PgExecutor, PgPool};
use writinghub_core::registration::RegistrationChange;
use writinghub_core::types::DbId;

use crate::models::workshop::{RegistrationWithCustomer, WorkshopRegistration};

/// Column list for `workshop_registrations` queries.
const COLUMNS: &str = "\
    id, workshop_id, customer_id, status, registered_at, attended_at, special_requirements";

pub struct WorkshopRegistrationRepo;

impl WorkshopRegistrationRepo {
    /// Number of registrations currently holding a seat.
    pub async fn count_registered<'e, E: PgExecutor<'e>>(
        executor: E,
        workshop_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM workshop_registrations \
             WHERE workshop_id = $1 AND status = 'registered'",
        )
        .bind(workshop_id)
        .fetch_one(executor)
        .await
    }

    /// The registration for a (workshop, customer) pair, in any status.
    pub async fn find_by_pair<'e, E: PgExecutor<'e>>(
        executor: E,
        workshop_id: DbId,
        customer_id: DbId,
    ) -> Result<Option<WorkshopRegistration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workshop_registrations \
             WHERE workshop_id = $1 AND customer_id = $2"
        );
        sqlx::query_as::<_, WorkshopRegistration>(&query)
            .bind(workshop_id)
            .bind(customer_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a `registered` row unless the pair already exists.
    ///
    /// Returns `None` when the unique pair constraint suppressed the insert.
    pub async fn insert_if_absent<'e, E: PgExecutor<'e>>(
        executor: E,
        workshop_id: DbId,
        customer_id: DbId,
        special_requirements: Option<&str>,
    ) -> Result<Option<WorkshopRegistration>, sqlx::Error> {
        let query = format!(
            "INSERT INTO workshop_registrations (workshop_id, customer_id, special_requirements) \
             VALUES ($1, $2, COALESCE($3, '')) \
             ON CONFLICT (workshop_id, customer_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkshopRegistration>(&query)
            .bind(workshop_id)
            .bind(customer_id)
            .bind(special_requirements)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkshopRegistration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workshop_registrations WHERE id = $1");
        sqlx::query_as::<_, WorkshopRegistration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Registrations for a workshop with registrant details, in signup order.
    pub async fn list_for_workshop(
        pool: &PgPool,
        workshop_id: DbId,
    ) -> Result<Vec<RegistrationWithCustomer>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationWithCustomer>(
            "SELECT r.id, r.workshop_id, r.customer_id, r.status, r.registered_at, \
                    r.attended_at, r.special_requirements, c.full_name, c.email \
             FROM workshop_registrations r \
             JOIN customers c ON c.id = r.customer_id \
             WHERE r.workshop_id = $1 \
             ORDER BY r.registered_at, r.id",
        )
        .bind(workshop_id)
        .fetch_all(pool)
        .await
    }

    /// Persist a planned status change. `None` means the row left
    /// `change.from` before this update ran.
    pub async fn apply_status_change(
        pool: &PgPool,
        id: DbId,
        change: &RegistrationChange,
    ) -> Result<Option<WorkshopRegistration>, sqlx::Error> {
        let query = format!(
            "UPDATE workshop_registrations SET
                status = $3,
                attended_at = COALESCE($4, attended_at)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkshopRegistration>(&query)
            .bind(id)
            .bind(change.from.as_str())
            .bind(change.to.as_str())
            .bind(change.attended_at)
            .fetch_optional(pool)
            .await
    }
}
