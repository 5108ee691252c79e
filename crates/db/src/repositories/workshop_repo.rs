//! Repository for the `workshops` table.

use sqlx::{PgConnection, PgPool};
use writinghub_core::types::DbId;

use crate::models::workshop::{
    CreateWorkshop, UpdateWorkshop, Workshop, WorkshopListParams, WorkshopWithCount,
};

/// Column list for `workshops` queries.
const COLUMNS: &str = "\
    id, title, slug, description, detailed_description, scheduled_at, \
    location, is_online, meeting_url, max_participants, facilitator, price, \
    is_active, created_at, updated_at";

/// Same columns qualified with the `w` alias, plus the seat count.
const COLUMNS_WITH_COUNT: &str = "\
    w.id, w.title, w.slug, w.description, w.detailed_description, w.scheduled_at, \
    w.location, w.is_online, w.meeting_url, w.max_participants, w.facilitator, w.price, \
    w.is_active, w.created_at, w.updated_at, \
    (SELECT COUNT(*) FROM workshop_registrations r \
     WHERE r.workshop_id = w.id AND r.status = 'registered') AS registered_count";

/// Provides CRUD operations for workshops.
pub struct WorkshopRepo;

impl WorkshopRepo {
    /// Insert a workshop. `slug` is stored only when the caller supplied one.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkshop,
        slug: Option<&str>,
    ) -> Result<Workshop, sqlx::Error> {
        let query = format!(
            "INSERT INTO workshops \
                (title, slug, description, detailed_description, scheduled_at, \
                 location, is_online, meeting_url, max_participants, facilitator, price) \
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, COALESCE($6, ''), \
                     COALESCE($7, FALSE), COALESCE($8, ''), $9, $10, COALESCE($11, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.detailed_description)
            .bind(input.scheduled_at)
            .bind(&input.location)
            .bind(input.is_online)
            .bind(&input.meeting_url)
            .bind(input.max_participants)
            .bind(&input.facilitator)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkshop,
    ) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!(
            "UPDATE workshops SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                detailed_description = COALESCE($4, detailed_description),
                scheduled_at = COALESCE($5, scheduled_at),
                location = COALESCE($6, location),
                is_online = COALESCE($7, is_online),
                meeting_url = COALESCE($8, meeting_url),
                max_participants = CASE WHEN $9 THEN $10 ELSE max_participants END,
                facilitator = COALESCE($11, facilitator),
                price = COALESCE($12, price),
                is_active = COALESCE($13, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.detailed_description)
            .bind(input.scheduled_at)
            .bind(&input.location)
            .bind(input.is_online)
            .bind(&input.meeting_url)
            .bind(input.max_participants.is_some())
            .bind(input.max_participants.flatten())
            .bind(&input.facilitator)
            .bind(input.price)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a workshop. Registrations and linked appointments go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workshops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workshop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workshops WHERE id = $1");
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a workshop with its seat count.
    pub async fn find_with_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkshopWithCount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS_WITH_COUNT} FROM workshops w WHERE w.id = $1");
        sqlx::query_as::<_, WorkshopWithCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List workshops with seat counts, soonest first.
    ///
    /// Inactive workshops are excluded unless `include_inactive` is set.
    pub async fn list_with_counts(
        pool: &PgPool,
        params: &WorkshopListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkshopWithCount>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();
        if !params.include_inactive.unwrap_or(false) {
            conditions.push("w.is_active");
        }
        if params.upcoming.unwrap_or(false) {
            conditions.push("w.scheduled_at > NOW()");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS_WITH_COUNT} FROM workshops w {where_clause} \
             ORDER BY w.scheduled_at, w.id \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, WorkshopWithCount>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Lock an active workshop row for the rest of the transaction.
    ///
    /// Concurrent registrations for the same workshop queue up behind this
    /// lock, so the seat count read afterwards stays accurate until commit.
    pub async fn lock_active_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Workshop>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM workshops WHERE id = $1 AND is_active FOR UPDATE");
        sqlx::query_as::<_, Workshop>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
