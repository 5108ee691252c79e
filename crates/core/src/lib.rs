//! Domain rules for the Writing Hub services backend.
//!
//! This crate has zero internal dependencies and performs no I/O: the
//! `db` crate persists what these modules decide, and the `api` crate
//! wires the two together.

mod macros;

pub mod catalog;
pub mod company;
pub mod customer;
pub mod error;
pub mod notification;
pub mod registration;
pub mod reports;
pub mod search;
pub mod service_request;
pub mod staff_access;
pub mod testimonial;
pub mod types;
pub mod workshop;
