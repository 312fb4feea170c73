//! Authentication extractor.
//!
//! Resolves a bearer token to an authenticated user before the handler
//! runs. Every list and product handler takes this extractor; none of
//! them can be reached without it.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires bearer-token authentication.
///
/// Rejection is always a 401, with one of three messages:
/// - the header is absent or missing the `Bearer ` prefix,
/// - the token fails verification (malformed, bad signature, expired),
/// - the token's user id no longer resolves to a stored user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".to_owned()))?;

        let user_id = state
            .tokens()
            .verify(token)
            .map_err(|_| AppError::Unauthorized("Not authorized, token failed".to_owned()))?;

        let user = UserRepository::new(state.store())
            .get_by_id(user_id)
            .await
            .ok_or_else(|| AppError::Unauthorized("User not found".to_owned()))?;

        Ok(Self(user))
    }
}
