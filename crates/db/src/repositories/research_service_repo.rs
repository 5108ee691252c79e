//! Repository for the `research_services` table.

use sqlx::PgPool;
use writinghub_core::types::DbId;

use crate::models::service::{CreateResearchService, ResearchService, UpdateResearchService};

/// Column list for `research_services` queries.
const COLUMNS: &str = "\
    id, name, slug, category, description, detailed_description, \
    price_from, price_to, turnaround_time, display_order, is_active, \
    created_at, updated_at";

/// Provides CRUD operations for research services.
pub struct ResearchServiceRepo;

impl ResearchServiceRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateResearchService,
        slug: &str,
    ) -> Result<ResearchService, sqlx::Error> {
        let query = format!(
            "INSERT INTO research_services \
                (name, slug, category, description, detailed_description, \
                 price_from, price_to, turnaround_time, display_order, is_active) \
             VALUES ($1, $2, $3, $4, COALESCE($5, ''), $6, $7, COALESCE($8, ''), \
                     COALESCE($9, 0), COALESCE($10, TRUE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResearchService>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(input.category.as_str())
            .bind(&input.description)
            .bind(&input.detailed_description)
            .bind(input.price_from)
            .bind(input.price_to)
            .bind(&input.turnaround_time)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResearchService>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM research_services WHERE id = $1");
        sqlx::query_as::<_, ResearchService>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a service by ID only if it is active.
    pub async fn find_active(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResearchService>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM research_services WHERE id = $1 AND is_active");
        sqlx::query_as::<_, ResearchService>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active services in catalog order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ResearchService>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM research_services WHERE is_active \
             ORDER BY display_order, name"
        );
        sqlx::query_as::<_, ResearchService>(&query)
            .fetch_all(pool)
            .await
    }

    /// Every service, active or not, for staff.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ResearchService>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM research_services ORDER BY display_order, name");
        sqlx::query_as::<_, ResearchService>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResearchService,
    ) -> Result<Option<ResearchService>, sqlx::Error> {
        let query = format!(
            "UPDATE research_services SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                detailed_description = COALESCE($5, detailed_description),
                price_from = COALESCE($6, price_from),
                price_to = COALESCE($7, price_to),
                turnaround_time = COALESCE($8, turnaround_time),
                display_order = COALESCE($9, display_order),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResearchService>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.category.map(|c| c.as_str()))
            .bind(&input.description)
            .bind(&input.detailed_description)
            .bind(input.price_from)
            .bind(input.price_to)
            .bind(&input.turnaround_time)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a service. Requests and testimonials that referenced it keep
    /// their rows with `service_id` set to NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM research_services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any research service already uses `slug`.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM research_services WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
    }
}
