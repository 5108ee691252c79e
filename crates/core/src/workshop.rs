//! Workshop schedule helpers and input validation.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum length for a workshop title.
pub const MAX_TITLE_LENGTH: usize = 255;

pub fn is_upcoming(scheduled_at: Timestamp, now: Timestamp) -> bool {
    scheduled_at > now
}

/// A capacity, when set, must allow at least one participant.
pub fn validate_capacity(max_participants: Option<i32>) -> Result<(), CoreError> {
    match max_participants {
        Some(max) if max < 1 => Err(CoreError::Validation(format!(
            "max_participants must be at least 1, got {max}"
        ))),
        _ => Ok(()),
    }
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Workshop title must not be empty".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Workshop title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Option<f64>) -> Result<(), CoreError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(CoreError::Validation(format!(
            "Workshop price must be a non-negative amount, got {p}"
        ))),
        _ => Ok(()),
    }
}

/// Meeting links (workshop `meeting_url`, zoom `zoom_link`) must be http(s).
pub fn validate_meeting_url(url: &str) -> Result<(), CoreError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Invalid meeting URL '{url}'. Must be an http(s) link"
        ))),
    }
}
