//! Repository for the `testimonials` table.

use sqlx::PgPool;
use writinghub_core::testimonial::{TestimonialKey, AUTO_RATING};
use writinghub_core::types::DbId;

use crate::models::testimonial::{
    CreateTestimonial, PublishedTestimonial, Testimonial, TestimonialListParams,
    UpdateTestimonialFlags,
};

/// Column list for `testimonials` queries.
const COLUMNS: &str = "\
    id, customer_id, service_id, rating, quote, is_published, is_featured, \
    is_auto_generated, created_at, updated_at";

/// Select list for public listings, joined with customer and service names.
const PUBLISHED_COLUMNS: &str = "\
    t.id, c.full_name AS customer_name, c.organization, t.service_id, \
    s.name AS service_name, t.rating, t.quote, t.is_featured, t.created_at";

pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Every (customer, service) pair that already has a testimonial of
    /// any kind.
    pub async fn existing_pairs(pool: &PgPool) -> Result<Vec<TestimonialKey>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT DISTINCT customer_id, service_id FROM testimonials \
             WHERE service_id IS NOT NULL",
        )
        .fetch_all(pool)
        .await
    }

    /// Insert a published, auto-generated testimonial for a pair.
    ///
    /// Nothing is inserted if the pair already has any testimonial, or if a
    /// concurrent run inserted the generated one first. Returns whether a
    /// row was created.
    pub async fn insert_auto(
        pool: &PgPool,
        customer_id: DbId,
        service_id: DbId,
        quote: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO testimonials \
                (customer_id, service_id, rating, quote, \
                 is_published, is_featured, is_auto_generated) \
             SELECT $1, $2, $3, $4, TRUE, FALSE, TRUE \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM testimonials WHERE customer_id = $1 AND service_id = $2 \
             ) \
             ON CONFLICT (customer_id, service_id) WHERE is_auto_generated DO NOTHING",
        )
        .bind(customer_id)
        .bind(service_id)
        .bind(AUTO_RATING)
        .bind(quote)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a staff-entered testimonial. `rating` must already be validated.
    pub async fn create_manual(
        pool: &PgPool,
        input: &CreateTestimonial,
        rating: i16,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials (customer_id, service_id, rating, quote, is_published) \
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(input.customer_id)
            .bind(input.service_id)
            .bind(rating)
            .bind(&input.quote)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Published testimonials, featured first, then newest.
    pub async fn list_published(
        pool: &PgPool,
        params: &TestimonialListParams,
        limit: i64,
    ) -> Result<Vec<PublishedTestimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLISHED_COLUMNS} \
             FROM testimonials t \
             JOIN customers c ON c.id = t.customer_id \
             LEFT JOIN research_services s ON s.id = t.service_id \
             WHERE t.is_published \
               AND ($1::BIGINT IS NULL OR t.service_id = $1) \
               AND (NOT $2 OR t.is_featured) \
             ORDER BY t.is_featured DESC, t.created_at DESC, t.id DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, PublishedTestimonial>(&query)
            .bind(params.service_id)
            .bind(params.featured_only.unwrap_or(false))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every testimonial, newest first, for moderation.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update_flags(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonialFlags,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET
                is_published = COALESCE($2, is_published),
                is_featured = COALESCE($3, is_featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(input.is_published)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Number of testimonials of any kind for a pair.
    pub async fn count_for_pair(
        pool: &PgPool,
        customer_id: DbId,
        service_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM testimonials WHERE customer_id = $1 AND service_id = $2",
        )
        .bind(customer_id)
        .bind(service_id)
        .fetch_one(pool)
        .await
    }
}
