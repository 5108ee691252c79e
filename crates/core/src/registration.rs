//! Workshop registration statuses, transitions, and capacity rules.
//!
//! Transition rules:
//! - `registered` -> `attended` (stamps `attended_at`)
//! - `registered` -> `cancelled`
//! - `registered` -> `no_show`, only once the workshop's scheduled time has passed
//!
//! Every other status is terminal.
//!
//! Capacity counts only rows in `registered`. Attendance, cancellation, and
//! no-shows free their seat.

use crate::error::CoreError;
use crate::macros::define_text_enum;
use crate::types::{DbId, Timestamp};

/// Maximum length for the free-text special requirements field.
pub const MAX_SPECIAL_REQUIREMENTS_LENGTH: usize = 2_000;

define_text_enum! {
    /// Status of a workshop registration.
    RegistrationStatus ("workshop registration status") {
        Registered => "registered",
        Attended => "attended",
        Cancelled => "cancelled",
        NoShow => "no_show",
    }
}

impl RegistrationStatus {
    /// Whether this registration occupies a seat.
    pub fn holds_seat(self) -> bool {
        self == RegistrationStatus::Registered
    }
}

/// An operation staff may invoke on a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationAction {
    MarkAttended,
    Cancel,
    NoShow,
}

impl RegistrationAction {
    pub fn target(self) -> RegistrationStatus {
        match self {
            RegistrationAction::MarkAttended => RegistrationStatus::Attended,
            RegistrationAction::Cancel => RegistrationStatus::Cancelled,
            RegistrationAction::NoShow => RegistrationStatus::NoShow,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            RegistrationAction::MarkAttended => "mark attended",
            RegistrationAction::Cancel => "cancel",
            RegistrationAction::NoShow => "mark no-show",
        }
    }

    /// Parse the action segment of a route (`attend`, `cancel`, `no-show`).
    pub fn from_route(segment: &str) -> Result<Self, CoreError> {
        match segment {
            "attend" => Ok(RegistrationAction::MarkAttended),
            "cancel" => Ok(RegistrationAction::Cancel),
            "no-show" => Ok(RegistrationAction::NoShow),
            other => Err(CoreError::Validation(format!(
                "Unknown registration action '{other}'. Must be one of: attend, cancel, no-show"
            ))),
        }
    }
}

/// A legal registration status change, ready to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationChange {
    pub from: RegistrationStatus,
    pub to: RegistrationStatus,
    /// Set only when the change reaches `attended`.
    pub attended_at: Option<Timestamp>,
}

/// Plan `action` on a registration in `current` for a workshop scheduled at
/// `workshop_at`.
pub fn plan_transition(
    current: RegistrationStatus,
    action: RegistrationAction,
    workshop_at: Timestamp,
    now: Timestamp,
) -> Result<RegistrationChange, CoreError> {
    let invalid = || CoreError::InvalidTransition {
        entity: "workshop registration",
        from: current.as_str(),
        action: action.verb(),
    };

    if current != RegistrationStatus::Registered {
        return Err(invalid());
    }
    if action == RegistrationAction::NoShow && now <= workshop_at {
        return Err(invalid());
    }

    let to = action.target();
    Ok(RegistrationChange {
        from: current,
        to,
        attended_at: (to == RegistrationStatus::Attended).then_some(now),
    })
}

/// A workshop is full when it has a capacity and the active registrations
/// have reached it. Workshops without a capacity are never full.
pub fn is_full(registered_count: i64, max_participants: Option<i32>) -> bool {
    max_participants.is_some_and(|max| registered_count >= i64::from(max))
}

/// Reject a new registration on a full workshop.
pub fn check_capacity(
    workshop_id: DbId,
    registered_count: i64,
    max_participants: Option<i32>,
) -> Result<(), CoreError> {
    match max_participants {
        Some(capacity) if is_full(registered_count, max_participants) => {
            Err(CoreError::WorkshopFull {
                workshop_id,
                capacity,
            })
        }
        _ => Ok(()),
    }
}

pub fn validate_special_requirements(text: Option<&str>) -> Result<(), CoreError> {
    if text.is_some_and(|t| t.len() > MAX_SPECIAL_REQUIREMENTS_LENGTH) {
        return Err(CoreError::Validation(format!(
            "Special requirements exceed maximum length of {MAX_SPECIAL_REQUIREMENTS_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn mark_attended_stamps_attended_at() {
        let change = plan_transition(
            RegistrationStatus::Registered,
            RegistrationAction::MarkAttended,
            now() - Duration::hours(2),
            now(),
        )
        .unwrap();
        assert_eq!(change.to, RegistrationStatus::Attended);
        assert_eq!(change.attended_at, Some(now()));
    }

    #[test]
    fn cancel_does_not_stamp_attended_at() {
        let change = plan_transition(
            RegistrationStatus::Registered,
            RegistrationAction::Cancel,
            now() + Duration::days(3),
            now(),
        )
        .unwrap();
        assert_eq!(change.to, RegistrationStatus::Cancelled);
        assert_eq!(change.attended_at, None);
    }

    #[test]
    fn only_registered_rows_can_transition() {
        for from in [
            RegistrationStatus::Attended,
            RegistrationStatus::Cancelled,
            RegistrationStatus::NoShow,
        ] {
            for action in [
                RegistrationAction::MarkAttended,
                RegistrationAction::Cancel,
                RegistrationAction::NoShow,
            ] {
                let result = plan_transition(from, action, now() - Duration::days(1), now());
                assert!(
                    matches!(result, Err(CoreError::InvalidTransition { .. })),
                    "{} from {from} should fail",
                    action.verb()
                );
            }
        }
    }

    #[test]
    fn no_show_requires_workshop_to_have_started() {
        let upcoming = now() + Duration::hours(1);
        assert!(plan_transition(
            RegistrationStatus::Registered,
            RegistrationAction::NoShow,
            upcoming,
            now()
        )
        .is_err());

        let past = now() - Duration::hours(1);
        let change = plan_transition(
            RegistrationStatus::Registered,
            RegistrationAction::NoShow,
            past,
            now(),
        )
        .unwrap();
        assert_eq!(change.to, RegistrationStatus::NoShow);
    }

    #[test]
    fn capacity_rules() {
        assert!(!is_full(100, None));
        assert!(!is_full(1, Some(2)));
        assert!(is_full(2, Some(2)));
        assert!(is_full(3, Some(2)));
    }

    #[test]
    fn check_capacity_reports_workshop_full() {
        assert!(check_capacity(7, 1, Some(2)).is_ok());
        assert!(check_capacity(7, 50, None).is_ok());
        let err = check_capacity(7, 2, Some(2)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::WorkshopFull {
                workshop_id: 7,
                capacity: 2
            }
        ));
    }

    #[test]
    fn only_registered_holds_a_seat() {
        assert!(RegistrationStatus::Registered.holds_seat());
        assert!(!RegistrationStatus::Attended.holds_seat());
        assert!(!RegistrationStatus::Cancelled.holds_seat());
        assert!(!RegistrationStatus::NoShow.holds_seat());
    }

    #[test]
    fn registration_status_literals() {
        assert_eq!(RegistrationStatus::NoShow.as_str(), "no_show");
        assert_eq!(
            "no_show".parse::<RegistrationStatus>().unwrap(),
            RegistrationStatus::NoShow
        );
        assert!("noshow".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn route_segments_map_to_actions() {
        assert_eq!(
            RegistrationAction::from_route("no-show").unwrap(),
            RegistrationAction::NoShow
        );
        assert!(RegistrationAction::from_route("attended").is_err());
    }
}
