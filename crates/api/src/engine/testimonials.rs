//! Testimonial Auto-Generator.
//!
//! Backfills a published testimonial for every completed request whose
//! (customer, service) pair has none. Safe to run any number of times and
//! from several places at once.

use std::collections::HashSet;

use sqlx::PgPool;
use writinghub_core::testimonial::{pick_quote, plan_backfill, CompletedRequest};
use writinghub_db::repositories::{ServiceRequestRepo, TestimonialRepo};

use crate::error::AppResult;

/// Run one backfill pass, returning how many testimonials were created.
pub async fn backfill(pool: &PgPool) -> AppResult<usize> {
    let completed: Vec<CompletedRequest> = ServiceRequestRepo::list_completed_with_service(pool)
        .await?
        .into_iter()
        .map(CompletedRequest::from)
        .collect();
    let existing: HashSet<_> = TestimonialRepo::existing_pairs(pool)
        .await?
        .into_iter()
        .collect();

    let planned = plan_backfill(&completed, &existing);
    if planned.is_empty() {
        return Ok(0);
    }

    let quotes: Vec<String> = {
        let mut rng = rand::rng();
        planned
            .iter()
            .map(|p| pick_quote(&p.service_name, &mut rng))
            .collect()
    };

    let mut created = 0;
    for (entry, quote) in planned.iter().zip(&quotes) {
        if TestimonialRepo::insert_auto(pool, entry.customer_id, entry.service_id, quote).await? {
            created += 1;
        }
    }

    if created > 0 {
        tracing::info!(created, planned = planned.len(), "Testimonials backfilled");
    }
    Ok(created)
}

/// Run a backfill from a read path, logging instead of failing the request.
pub async fn backfill_best_effort(pool: &PgPool) {
    if let Err(e) = backfill(pool).await {
        tracing::warn!(error = %e, "Testimonial backfill failed");
    }
}
