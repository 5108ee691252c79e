//! Notification types.
//!
//! Notifications are a passive read-model written by view-layer
//! collaborators; nothing in the lifecycle engines depends on them.

use crate::error::CoreError;
use crate::macros::define_text_enum;

/// Maximum length for a notification title.
pub const MAX_TITLE_LENGTH: usize = 255;

define_text_enum! {
    /// Kind of notification shown to a customer.
    NotificationType ("notification type") {
        ServiceUpdate => "service_update",
        WorkshopReminder => "workshop_reminder",
        Message => "message",
        System => "system",
    }
}

pub fn validate_notification(title: &str, message: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() || message.trim().is_empty() {
        return Err(CoreError::Validation(
            "A notification needs a title and a message".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Notification title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}
