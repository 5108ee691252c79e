//! Service request lifecycle: statuses, legal transitions, deadline queries.
//!
//! ```text
//! pending --> accepted --> in_progress --> completed
//!    |           |   \__________________________^
//!    |           |            |
//!    +-----------+------------+--> cancelled
//! ```
//!
//! `accepted` may complete directly; `pending` may not. `completed` and
//! `cancelled` are terminal. Every status change in the system is planned
//! here and persisted by the repository layer, so no call site can assign
//! a status the state machine does not allow.

use crate::error::CoreError;
use crate::macros::define_text_enum;
use crate::types::Timestamp;

/// Maximum length for a request title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length for a request description.
pub const MAX_DESCRIPTION_LENGTH: usize = 20_000;

const SECONDS_PER_DAY: i64 = 86_400;

define_text_enum! {
    /// Status of a service request.
    RequestStatus ("service request status") {
        Pending => "pending",
        Accepted => "accepted",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl RequestStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// Statuses reachable in one step from `self`.
    pub fn valid_transitions(self) -> &'static [RequestStatus] {
        use RequestStatus::*;
        match self {
            Pending => &[Accepted, Cancelled],
            Accepted => &[InProgress, Completed, Cancelled],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled => &[],
        }
    }

    pub fn can_transition(self, to: RequestStatus) -> bool {
        self.valid_transitions().contains(&to)
    }
}

/// An operation a caller may invoke on a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Accept,
    StartProgress,
    Complete,
    Cancel,
}

impl RequestAction {
    /// The status this action moves a request into.
    pub fn target(self) -> RequestStatus {
        match self {
            RequestAction::Accept => RequestStatus::Accepted,
            RequestAction::StartProgress => RequestStatus::InProgress,
            RequestAction::Complete => RequestStatus::Completed,
            RequestAction::Cancel => RequestStatus::Cancelled,
        }
    }

    /// Verb used in error messages and logs.
    pub fn verb(self) -> &'static str {
        match self {
            RequestAction::Accept => "accept",
            RequestAction::StartProgress => "start",
            RequestAction::Complete => "complete",
            RequestAction::Cancel => "cancel",
        }
    }

    /// Parse the action segment of a route (`accept`, `start`, `complete`, `cancel`).
    pub fn from_route(segment: &str) -> Result<Self, CoreError> {
        match segment {
            "accept" => Ok(RequestAction::Accept),
            "start" => Ok(RequestAction::StartProgress),
            "complete" => Ok(RequestAction::Complete),
            "cancel" => Ok(RequestAction::Cancel),
            other => Err(CoreError::Validation(format!(
                "Unknown service request action '{other}'. Must be one of: accept, start, complete, cancel"
            ))),
        }
    }
}

/// The outcome of a legal transition, ready to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: RequestStatus,
    pub to: RequestStatus,
    /// Set only when the change reaches `completed`.
    pub completed_at: Option<Timestamp>,
}

/// Plan the status change for `action` on a request currently in `current`.
///
/// Completing an already-completed request is rejected like any other
/// transition out of a terminal state, so `completed_at` can only ever be
/// stamped by the single change that reaches `completed`.
pub fn plan_transition(
    current: RequestStatus,
    action: RequestAction,
    now: Timestamp,
) -> Result<StatusChange, CoreError> {
    let to = action.target();
    if !current.can_transition(to) {
        return Err(CoreError::InvalidTransition {
            entity: "service request",
            from: current.as_str(),
            action: action.verb(),
        });
    }

    Ok(StatusChange {
        from: current,
        to,
        completed_at: (to == RequestStatus::Completed).then_some(now),
    })
}

/// A request is overdue when it has a deadline, is not terminal, and the
/// deadline has passed.
pub fn is_overdue(deadline: Option<Timestamp>, status: RequestStatus, now: Timestamp) -> bool {
    match deadline {
        Some(deadline) => !status.is_terminal() && now > deadline,
        None => false,
    }
}

/// Whole days from `now` until `deadline`, rounded towards negative infinity.
///
/// A deadline twelve hours away yields `0`; one twelve hours past yields `-1`.
pub fn days_until_deadline(deadline: Option<Timestamp>, now: Timestamp) -> Option<i64> {
    deadline.map(|d| (d - now).num_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Validate the customer-supplied parts of a new request.
pub fn validate_new_request(title: &str, description: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(CoreError::Validation(
            "A service request needs both a title and a description".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Budgets, when given, must be non-negative.
pub fn validate_budget(budget: Option<f64>) -> Result<(), CoreError> {
    match budget {
        Some(b) if !b.is_finite() || b < 0.0 => Err(CoreError::Validation(format!(
            "Budget must be a non-negative amount, got {b}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
