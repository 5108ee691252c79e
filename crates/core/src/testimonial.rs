//! Testimonial rules and the backfill planner for auto-generated entries.
//!
//! Every completed request with a service should be represented by a
//! published testimonial for its (customer, service) pair. The planner only
//! decides which pairs are missing; it never touches existing testimonials,
//! whether staff-written or generated by an earlier run.

use std::collections::HashSet;

use rand::Rng;

use crate::error::CoreError;
use crate::types::DbId;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Rating given to generated testimonials.
pub const AUTO_RATING: i16 = 5;

/// Maximum length for a testimonial quote.
pub const MAX_QUOTE_LENGTH: usize = 5_000;

/// Quote templates for generated testimonials. `{service}` is replaced with
/// the service name.
pub const QUOTE_TEMPLATES: &[&str] = &[
    "Excellent service! The {service} was delivered professionally and on time.",
    "Very satisfied with the {service} work. Highly recommended!",
    "A great experience with {service}. I will definitely come back.",
    "Outstanding quality on the {service}. The team was very responsive.",
    "Impressive results from the {service}. Worth every shilling!",
];

/// The (customer, service) key used for de-duplication.
pub type TestimonialKey = (DbId, DbId);

/// A completed request as seen by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRequest {
    pub customer_id: DbId,
    /// `None` when the request never had a service or the service was removed.
    pub service_id: Option<DbId>,
    pub service_name: Option<String>,
}

/// A testimonial the backfill should create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTestimonial {
    pub customer_id: DbId,
    pub service_id: DbId,
    pub service_name: String,
}

/// Decide which testimonials are missing.
///
/// Requests without a service are skipped. Pairs already in `existing` are
/// skipped. Several completed requests for the same pair produce a single
/// entry, in the order they first appear.
pub fn plan_backfill(
    completed: &[CompletedRequest],
    existing: &HashSet<TestimonialKey>,
) -> Vec<PlannedTestimonial> {
    let mut seen: HashSet<TestimonialKey> = HashSet::new();
    completed
        .iter()
        .filter_map(|req| {
            let service_id = req.service_id?;
            let service_name = req.service_name.clone()?;
            let key = (req.customer_id, service_id);
            if existing.contains(&key) || !seen.insert(key) {
                return None;
            }
            Some(PlannedTestimonial {
                customer_id: req.customer_id,
                service_id,
                service_name,
            })
        })
        .collect()
}

/// Render a quote from a pseudo-randomly chosen template.
pub fn pick_quote<R: Rng>(service_name: &str, rng: &mut R) -> String {
    let template = QUOTE_TEMPLATES[rng.random_range(0..QUOTE_TEMPLATES.len())];
    template.replace("{service}", service_name)
}

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

pub fn validate_quote(quote: &str) -> Result<(), CoreError> {
    if quote.trim().is_empty() {
        return Err(CoreError::Validation(
            "Testimonial quote must not be empty".to_string(),
        ));
    }
    if quote.len() > MAX_QUOTE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Testimonial quote exceeds maximum length of {MAX_QUOTE_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
