//! Engines that apply core rules against the entity store.
//!
//! Handlers call into these instead of touching status columns directly.
//! Each engine loads the entity, asks `writinghub_core` to plan the change,
//! persists it, and logs the outcome.

pub mod lifecycle;
pub mod registration;
pub mod testimonials;
