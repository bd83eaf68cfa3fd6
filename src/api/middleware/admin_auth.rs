//! Admin authentication using a shared admin key
//!
//! Account administration (enabling and disabling users) requires the
//! configured admin key in the `X-Admin-Key` header. With no key configured,
//! every admin request is rejected.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Extractor that requires the admin key
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_key.as_deref() else {
            warn!("Admin request rejected: no admin key configured");
            return Err(ApiError::unauthorized("Admin access is not configured"));
        };

        let provided = extract_admin_key(&parts.headers)?;

        if !keys_match(provided.as_bytes(), expected.as_bytes()) {
            warn!("Admin request rejected: invalid admin key");
            return Err(ApiError::unauthorized("Invalid admin key"));
        }

        debug!("Admin access granted");
        Ok(RequireAdmin)
    }
}

/// Extract the admin key from the `X-Admin-Key` header
pub fn extract_admin_key(headers: &HeaderMap) -> Result<String, ApiError> {
    let Some(value) = headers.get(ADMIN_KEY_HEADER) else {
        return Err(ApiError::unauthorized(
            "Admin access required. Provide the admin key via 'X-Admin-Key' header",
        ));
    };

    let key = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid X-Admin-Key header encoding"))?
        .trim();

    if key.is_empty() {
        return Err(ApiError::unauthorized("Admin key must not be empty"));
    }

    Ok(key.to_string())
}

/// Compares without short-circuiting on the first differing byte
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }

    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
