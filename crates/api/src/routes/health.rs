use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness payload for load balancers and uptime checks.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the periodic testimonial backfill task was started.
    pub testimonial_backfill_enabled: bool,
    /// Whether a staff token is configured. Without one every staff route
    /// answers 401.
    pub staff_access_configured: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = writinghub_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: state.company.company_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        testimonial_backfill_enabled: state.config.testimonial_backfill_interval_secs > 0,
        staff_access_configured: state.config.staff_token_hash.is_some(),
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
