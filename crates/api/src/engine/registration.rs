//! Registration Engine.
//!
//! Registration runs in one transaction that locks the workshop row, so the
//! seat count and the insert for a workshop are serialized. The unique
//! (workshop, customer) constraint stays the final word on duplicates.

use chrono::Utc;
use sqlx::PgPool;
use writinghub_core::error::CoreError;
use writinghub_core::registration::{
    check_capacity, plan_transition, validate_special_requirements, RegistrationAction,
};
use writinghub_core::types::DbId;
use writinghub_db::models::workshop::WorkshopRegistration;
use writinghub_db::repositories::{WorkshopRegistrationRepo, WorkshopRepo};

use crate::error::{AppError, AppResult};

/// Result of a registration attempt that did not fail.
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    /// A new `registered` row was created.
    Created(WorkshopRegistration),
    /// The pair was already registered; the existing row is returned as is.
    AlreadyRegistered(WorkshopRegistration),
}

impl RegistrationOutcome {
    pub fn registration(&self) -> &WorkshopRegistration {
        match self {
            RegistrationOutcome::Created(reg) | RegistrationOutcome::AlreadyRegistered(reg) => reg,
        }
    }

    pub fn into_registration(self) -> WorkshopRegistration {
        match self {
            RegistrationOutcome::Created(reg) | RegistrationOutcome::AlreadyRegistered(reg) => reg,
        }
    }

    pub fn is_already_registered(&self) -> bool {
        matches!(self, RegistrationOutcome::AlreadyRegistered(_))
    }
}

/// Register a customer for an active workshop.
///
/// An existing registration for the pair, whatever its status, is returned
/// unchanged before capacity is considered. Otherwise a full workshop fails
/// with `WorkshopFull`.
pub async fn register(
    pool: &PgPool,
    workshop_id: DbId,
    customer_id: DbId,
    special_requirements: Option<&str>,
) -> AppResult<RegistrationOutcome> {
    validate_special_requirements(special_requirements)?;

    let mut tx = pool.begin().await?;

    let workshop = WorkshopRepo::lock_active_for_update(&mut *tx, workshop_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workshop",
            id: workshop_id,
        }))?;

    if let Some(existing) =
        WorkshopRegistrationRepo::find_by_pair(&mut *tx, workshop_id, customer_id).await?
    {
        tx.commit().await?;
        tracing::debug!(workshop_id, customer_id, "Customer already registered");
        return Ok(RegistrationOutcome::AlreadyRegistered(existing));
    }

    let registered = WorkshopRegistrationRepo::count_registered(&mut *tx, workshop_id).await?;
    check_capacity(workshop_id, registered, workshop.max_participants)?;

    let inserted = WorkshopRegistrationRepo::insert_if_absent(
        &mut *tx,
        workshop_id,
        customer_id,
        special_requirements,
    )
    .await?;

    let outcome = match inserted {
        Some(reg) => RegistrationOutcome::Created(reg),
        None => {
            let existing =
                WorkshopRegistrationRepo::find_by_pair(&mut *tx, workshop_id, customer_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "Registration for workshop {workshop_id} and customer \
                             {customer_id} conflicted but could not be read back"
                        ))
                    })?;
            RegistrationOutcome::AlreadyRegistered(existing)
        }
    };

    tx.commit().await?;

    tracing::info!(
        workshop_id,
        customer_id,
        registration_id = outcome.registration().id,
        created = !outcome.is_already_registered(),
        "Workshop registration processed",
    );

    Ok(outcome)
}

/// Apply a staff action to a registration.
pub async fn apply(
    pool: &PgPool,
    registration_id: DbId,
    action: RegistrationAction,
) -> AppResult<WorkshopRegistration> {
    let registration = WorkshopRegistrationRepo::find_by_id(pool, registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkshopRegistration",
            id: registration_id,
        }))?;

    let workshop = WorkshopRepo::find_by_id(pool, registration.workshop_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workshop",
            id: registration.workshop_id,
        }))?;

    let change = plan_transition(registration.status, action, workshop.scheduled_at, Utc::now())?;

    let updated = WorkshopRegistrationRepo::apply_status_change(pool, registration_id, &change)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidTransition {
            entity: "workshop registration",
            from: change.from.as_str(),
            action: action.verb(),
        }))?;

    tracing::info!(
        registration_id,
        workshop_id = updated.workshop_id,
        customer_id = updated.customer_id,
        from = %change.from,
        to = %change.to,
        "Workshop registration status changed",
    );

    Ok(updated)
}
