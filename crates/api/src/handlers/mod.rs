use std::future::Future;

use writinghub_core::catalog::{slug_candidate, slugify};

use crate::error::{AppError, AppResult};

pub mod company;
pub mod consultancy;
pub mod contact;
pub mod customers;
pub mod notifications;
pub mod registrations;
pub mod reports;
pub mod requests;
pub mod services;
pub mod testimonials;
pub mod workshops;
pub mod zoom;

/// Pick the slug for a new catalog entry.
///
/// An explicit slug is normalised and used as is, so a clash surfaces as a
/// conflict. A slug derived from the name takes the first of `base`,
/// `base-2`, `base-3`, ... that `taken` reports as free.
pub(crate) async fn catalog_slug<F, Fut>(
    explicit: Option<&str>,
    name: &str,
    mut taken: F,
) -> AppResult<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, sqlx::Error>>,
{
    let base = slugify(explicit.unwrap_or(name));
    if base.is_empty() {
        return Err(AppError::BadRequest(
            "Service name or slug must contain letters or digits".into(),
        ));
    }
    if explicit.is_some() {
        return Ok(base);
    }

    let mut attempt = 1;
    loop {
        let candidate = slug_candidate(&base, attempt);
        if !taken(candidate.clone()).await? {
            return Ok(candidate);
        }
        attempt += 1;
    }
}
