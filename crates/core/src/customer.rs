//! Customer identity rules.
//!
//! Customers are keyed by email. Every entry point (contact form, service
//! request, workshop registration) normalizes the address with
//! [`normalize_email`] before looking the customer up, so `Ana@Example.com `
//! and `ana@example.com` are the same customer.

use crate::error::CoreError;
use crate::macros::define_text_enum;

/// Maximum length for a customer's display name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for a phone number.
pub const MAX_PHONE_LENGTH: usize = 20;

define_text_enum! {
    /// Whether a customer is a person or an organization.
    CustomerType ("customer type") {
        Individual => "individual",
        Organization => "organization",
    }
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Individual
    }
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Shallow structural check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid email address '{email}'"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.contains(char::is_whitespace)
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
    {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_full_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Full name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Full name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_phone(phone: Option<&str>) -> Result<(), CoreError> {
    if phone.is_some_and(|p| p.trim().len() > MAX_PHONE_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Phone number exceeds maximum length of {MAX_PHONE_LENGTH} characters"
        )));
    }
    Ok(())
}
