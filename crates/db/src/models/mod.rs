//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs where callers submit data
//!
//! Status columns decode straight into the closed enums from
//! `writinghub_core` via `#[sqlx(try_from = "String")]`; an unknown literal
//! in the database surfaces as a decode error instead of a stray string.

use serde::{Deserialize, Deserializer};

pub mod customer;
pub mod notification;
pub mod report;
pub mod service;
pub mod service_request;
pub mod testimonial;
pub mod workshop;

/// Deserialize a field where JSON `null` means "clear" and an absent key
/// means "leave unchanged". Use with `#[serde(default, deserialize_with = "nullable")]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
