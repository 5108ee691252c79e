//! Periodic testimonial backfill.
//!
//! Complements the backfill that runs on testimonial and service pages, so
//! requests completed while nobody browses still get their testimonial.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::engine::testimonials;

/// Run the backfill loop every `interval` until `cancel` is triggered.
///
/// The first pass runs immediately.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Testimonial backfill job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Testimonial backfill job stopping");
                break;
            }
            _ = ticker.tick() => {
                match testimonials::backfill(&pool).await {
                    Ok(0) => tracing::debug!("Testimonial backfill: nothing to create"),
                    Ok(created) => tracing::info!(created, "Testimonial backfill: created testimonials"),
                    Err(e) => tracing::error!(error = %e, "Testimonial backfill: run failed"),
                }
            }
        }
    }
}
