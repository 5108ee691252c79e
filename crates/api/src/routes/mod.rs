pub mod catalog;
pub mod health;
pub mod staff;
pub mod workshops;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /company                         company profile
/// /contact                         contact form (POST)
/// /services                        research catalog, service requests
/// /consultancy                     consultancy catalog
/// /workshops                       workshops, registration
/// /testimonials                    published testimonials
/// /staff/...                       staff area (bearer token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/company", get(handlers::company::get_company))
        .route("/contact", post(handlers::contact::submit_contact))
        .nest("/services", catalog::services_router())
        .nest("/consultancy", catalog::consultancy_router())
        .nest("/workshops", workshops::router())
        .route(
            "/testimonials",
            get(handlers::testimonials::list_published),
        )
        .nest("/staff", staff::router())
}
