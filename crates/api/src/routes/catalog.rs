//! Route definitions for the public catalog.
//!
//! Mounted at `/services` and `/consultancy` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{consultancy, services};
use crate::state::AppState;

/// Research service routes.
///
/// ```text
/// GET    /                  -> list_services
/// GET    /{id}              -> get_service
/// POST   /{id}/requests     -> request_service
/// ```
pub fn services_router() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list_services))
        .route("/{id}", get(services::get_service))
        .route("/{id}/requests", post(services::request_service))
}

/// Consultancy routes.
///
/// ```text
/// GET    /                  -> list_consultancy
/// ```
pub fn consultancy_router() -> Router<AppState> {
    Router::new().route("/", get(consultancy::list_consultancy))
}
