//! Route definitions for the staff area.
//!
//! Mounted at `/staff` by `api_routes()`. Every handler here takes the
//! `RequireStaff` extractor.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{
    consultancy, customers, notifications, registrations, reports, requests, services,
    testimonials, workshops, zoom,
};
use crate::state::AppState;

/// Staff routes.
///
/// ```text
/// GET    /customers                                   -> list_customers
/// GET    /customers/{id}                              -> get_customer
/// PUT    /customers/{id}                              -> update_customer
/// POST   /customers/{id}/toggle-active                -> toggle_customer_active
/// GET    /customers/{id}/notifications                -> notifications::list_for_customer
/// POST   /customers/{id}/notifications/{nid}/read     -> notifications::mark_read
///
/// GET    /requests                                    -> list_requests (?status, ?customer_id)
/// GET    /requests/{id}                               -> get_request
/// PUT    /requests/{id}                               -> update_request
/// POST   /requests/{id}/{action}                      -> request_action (accept|start|complete|cancel)
///
/// GET    /services                                    -> list_all_services
/// POST   /services                                    -> create_service
/// PUT    /services/{id}                               -> update_service
/// DELETE /services/{id}                               -> delete_service
/// POST   /consultancy                                 -> create_consultancy
/// PUT    /consultancy/{id}                            -> update_consultancy
/// DELETE /consultancy/{id}                            -> delete_consultancy
///
/// GET    /workshops                                   -> list_all_workshops
/// POST   /workshops                                   -> create_workshop
/// PUT    /workshops/{id}                              -> update_workshop
/// DELETE /workshops/{id}                              -> delete_workshop
/// GET    /workshops/{id}/registrations                -> list_registrations
/// POST   /registrations/{id}/{action}                 -> registration_action (attend|cancel|no-show)
///
/// GET    /testimonials                                -> testimonials::list_all
/// POST   /testimonials                                -> create_testimonial
/// PUT    /testimonials/{id}                           -> update_flags
///
/// POST   /notifications                               -> create_notification
///
/// GET    /zoom                                        -> list_appointments
/// POST   /zoom                                        -> create_appointment
/// PUT    /zoom/{id}                                   -> update_appointment
/// DELETE /zoom/{id}                                   -> delete_appointment
/// POST   /zoom/{id}/toggle                            -> toggle_appointment
///
/// GET    /reports                                     -> get_reports
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Customers
        .route("/customers", get(customers::list_customers))
        .route(
            "/customers/{id}",
            get(customers::get_customer).put(customers::update_customer),
        )
        .route(
            "/customers/{id}/toggle-active",
            post(customers::toggle_customer_active),
        )
        .route(
            "/customers/{id}/notifications",
            get(notifications::list_for_customer),
        )
        .route(
            "/customers/{id}/notifications/{notification_id}/read",
            post(notifications::mark_read),
        )
        // Requests
        .route("/requests", get(requests::list_requests))
        .route(
            "/requests/{id}",
            get(requests::get_request).put(requests::update_request),
        )
        .route("/requests/{id}/{action}", post(requests::request_action))
        // Catalog
        .route(
            "/services",
            get(services::list_all_services).post(services::create_service),
        )
        .route(
            "/services/{id}",
            put(services::update_service).delete(services::delete_service),
        )
        .route("/consultancy", post(consultancy::create_consultancy))
        .route(
            "/consultancy/{id}",
            put(consultancy::update_consultancy).delete(consultancy::delete_consultancy),
        )
        // Workshops
        .route(
            "/workshops",
            get(workshops::list_all_workshops).post(workshops::create_workshop),
        )
        .route(
            "/workshops/{id}",
            put(workshops::update_workshop).delete(workshops::delete_workshop),
        )
        .route(
            "/workshops/{id}/registrations",
            get(workshops::list_registrations),
        )
        .route(
            "/registrations/{id}/{action}",
            post(registrations::registration_action),
        )
        // Testimonials
        .route(
            "/testimonials",
            get(testimonials::list_all).post(testimonials::create_testimonial),
        )
        .route("/testimonials/{id}", put(testimonials::update_flags))
        // Notifications
        .route("/notifications", post(notifications::create_notification))
        // Zoom
        .route(
            "/zoom",
            get(zoom::list_appointments).post(zoom::create_appointment),
        )
        .route(
            "/zoom/{id}",
            put(zoom::update_appointment).delete(zoom::delete_appointment),
        )
        .route("/zoom/{id}/toggle", post(zoom::toggle_appointment))
        // Reports
        .route("/reports", get(reports::get_reports))
}
