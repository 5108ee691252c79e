use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A status change that the entity's state machine does not permit.
    #[error("Invalid transition: cannot {action} {entity} in status '{from}'")]
    InvalidTransition {
        entity: &'static str,
        from: &'static str,
        action: &'static str,
    },

    #[error("Workshop {workshop_id} is full ({capacity} participants)")]
    WorkshopFull { workshop_id: DbId, capacity: i32 },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
