//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, where a caller needs a transaction, any
//! `PgExecutor`) as the first argument.

pub mod consultancy_service_repo;
pub mod customer_repo;
pub mod notification_repo;
pub mod report_repo;
pub mod research_service_repo;
pub mod service_request_repo;
pub mod testimonial_repo;
pub mod workshop_registration_repo;
pub mod workshop_repo;
pub mod zoom_appointment_repo;

pub use consultancy_service_repo::ConsultancyServiceRepo;
pub use customer_repo::CustomerRepo;
pub use notification_repo::NotificationRepo;
pub use report_repo::ReportRepo;
pub use research_service_repo::ResearchServiceRepo;
pub use service_request_repo::ServiceRequestRepo;
pub use testimonial_repo::TestimonialRepo;
pub use workshop_registration_repo::WorkshopRegistrationRepo;
pub use workshop_repo::WorkshopRepo;
pub use zoom_appointment_repo::ZoomAppointmentRepo;
