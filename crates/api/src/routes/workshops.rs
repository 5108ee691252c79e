//! Route definitions for public workshop pages.
//!
//! Mounted at `/workshops` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workshops;
use crate::state::AppState;

/// Workshop routes.
///
/// ```text
/// GET    /                  -> list_workshops
/// GET    /{id}              -> get_workshop
/// POST   /{id}/register     -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workshops::list_workshops))
        .route("/{id}", get(workshops::get_workshop))
        .route("/{id}/register", post(workshops::register))
}
