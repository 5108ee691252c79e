//! Staff access extractor.
//!
//! Staff routes require `Authorization: Bearer <STAFF_API_TOKEN>`. The
//! server holds only the token digest; when no token is configured every
//! staff request is rejected.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use writinghub_core::error::CoreError;
use writinghub_core::staff_access::verify_token;

use crate::error::AppError;
use crate::state::AppState;

/// Marker proving the request carried the staff token. Rejects with 401
/// Unauthorized otherwise.
///
/// ```ignore
/// async fn staff_only(_staff: RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff;

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized =
            |msg: &str| AppError::Core(CoreError::Unauthorized(msg.to_string()));

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or_else(|| unauthorized("Missing staff bearer token"))?;

        let expected = state
            .config
            .staff_token_hash
            .as_deref()
            .ok_or_else(|| unauthorized("Staff access is not configured"))?;

        if !verify_token(token, expected) {
            return Err(unauthorized("Invalid staff token"));
        }
        Ok(RequireStaff)
    }
}
