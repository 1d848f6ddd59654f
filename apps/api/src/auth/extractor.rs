use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The uniform unauthenticated message. Deliberately identical for a
/// missing header, a bad scheme, and an invalid or expired token, so the
/// response never reveals which check failed.
pub const UNAUTHENTICATED: &str = "Authentication required. Please log in again.";

/// Extractor that validates the bearer session token and exposes the
/// embedded identity to handlers.
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(UNAUTHENTICATED.to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized(UNAUTHENTICATED.to_string()))?;

        let claims = state
            .session_keys
            .verify(token)
            .ok_or_else(|| AppError::Unauthorized(UNAUTHENTICATED.to_string()))?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}
