use std::sync::Arc;

use writinghub_core::company::CompanyProfile;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: writinghub_db::DbPool,
    /// Server configuration (staff token digest, backfill interval).
    pub config: Arc<ServerConfig>,
    /// Company profile, loaded once at startup and read-only afterwards.
    pub company: Arc<CompanyProfile>,
}
