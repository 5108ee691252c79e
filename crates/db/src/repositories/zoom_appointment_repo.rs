//! Repository for the `zoom_appointments` table.

use sqlx::PgPool;
use writinghub_core::types::DbId;

use crate::models::workshop::{CreateZoomAppointment, UpdateZoomAppointment, ZoomAppointment};

/// Column list for `zoom_appointments` queries.
const COLUMNS: &str = "\
    id, workshop_id, consultancy_service_id, zoom_link, meeting_id, passcode, \
    start_time, is_active, created_at, updated_at";

pub struct ZoomAppointmentRepo;

impl ZoomAppointmentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateZoomAppointment,
    ) -> Result<ZoomAppointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO zoom_appointments \
                (workshop_id, consultancy_service_id, zoom_link, meeting_id, passcode, start_time) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ZoomAppointment>(&query)
            .bind(input.workshop_id)
            .bind(input.consultancy_service_id)
            .bind(&input.zoom_link)
            .bind(&input.meeting_id)
            .bind(&input.passcode)
            .bind(input.start_time)
            .fetch_one(pool)
            .await
    }

    /// All appointments, latest start first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ZoomAppointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM zoom_appointments ORDER BY start_time DESC");
        sqlx::query_as::<_, ZoomAppointment>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_active_for_workshop(
        pool: &PgPool,
        workshop_id: DbId,
    ) -> Result<Option<ZoomAppointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM zoom_appointments WHERE workshop_id = $1 AND is_active"
        );
        sqlx::query_as::<_, ZoomAppointment>(&query)
            .bind(workshop_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn toggle_active(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ZoomAppointment>, sqlx::Error> {
        let query = format!(
            "UPDATE zoom_appointments SET is_active = NOT is_active, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ZoomAppointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateZoomAppointment,
    ) -> Result<Option<ZoomAppointment>, sqlx::Error> {
        let query = format!(
            "UPDATE zoom_appointments SET
                zoom_link = COALESCE($2, zoom_link),
                meeting_id = COALESCE($3, meeting_id),
                passcode = COALESCE($4, passcode),
                start_time = COALESCE($5, start_time),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ZoomAppointment>(&query)
            .bind(id)
            .bind(&input.zoom_link)
            .bind(&input.meeting_id)
            .bind(&input.passcode)
            .bind(input.start_time)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM zoom_appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
