//! Request extractors that guard routes.

pub mod staff;
