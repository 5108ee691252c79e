//! Repository for the `consultancy_services` table.

use sqlx::PgPool;
use writinghub_core::types::DbId;

use crate::models::service::{
    ConsultancyService, CreateConsultancyService, UpdateConsultancyService,
};

/// Column list for `consultancy_services` queries.
const COLUMNS: &str = "\
    id, name, slug, consultancy_type, description, detailed_description, \
    features, hourly_rate, display_order, is_active, created_at, updated_at";

pub struct ConsultancyServiceRepo;

impl ConsultancyServiceRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateConsultancyService,
        slug: &str,
    ) -> Result<ConsultancyService, sqlx::Error> {
        let query = format!(
            "INSERT INTO consultancy_services \
                (name, slug, consultancy_type, description, detailed_description, \
                 features, hourly_rate, display_order) \
             VALUES ($1, $2, $3, $4, COALESCE($5, ''), COALESCE($6, ''), $7, COALESCE($8, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConsultancyService>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(input.consultancy_type.as_str())
            .bind(&input.description)
            .bind(&input.detailed_description)
            .bind(&input.features)
            .bind(input.hourly_rate)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    /// Active consultancy services in catalog order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ConsultancyService>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM consultancy_services WHERE is_active \
             ORDER BY display_order, name"
        );
        sqlx::query_as::<_, ConsultancyService>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ConsultancyService>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM consultancy_services WHERE id = $1");
        sqlx::query_as::<_, ConsultancyService>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateConsultancyService,
    ) -> Result<Option<ConsultancyService>, sqlx::Error> {
        let query = format!(
            "UPDATE consultancy_services SET
                name = COALESCE($2, name),
                consultancy_type = COALESCE($3, consultancy_type),
                description = COALESCE($4, description),
                detailed_description = COALESCE($5, detailed_description),
                features = COALESCE($6, features),
                hourly_rate = COALESCE($7, hourly_rate),
                display_order = COALESCE($8, display_order),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConsultancyService>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.consultancy_type.map(|t| t.as_str()))
            .bind(&input.description)
            .bind(&input.detailed_description)
            .bind(&input.features)
            .bind(input.hourly_rate)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a consultancy service. Linked appointments keep their row with
    /// the reference cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM consultancy_services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any consultancy service already uses `slug`.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM consultancy_services WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
    }
}
