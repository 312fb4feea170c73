//! Authentication route handlers.
//!
//! Registration and login both answer with a freshly issued token plus
//! the user, so clients can authenticate immediately.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for register and login: token plus user.
#[derive(Debug, Serialize)]
struct AuthResponse {
    success: bool,
    token: String,
    user: User,
}

/// Response for the current-user endpoint.
#[derive(Debug, Serialize)]
struct MeResponse {
    success: bool,
    user: User,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.store());
    let user = auth
        .register(&body.username, &body.email, &body.password)
        .await?;
    let token = state.tokens().issue(user.id)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user,
        }),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.store());
    let user = auth.login(&body.email, &body.password).await?;
    let token = state.tokens().issue(user.id)?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}

/// `GET /api/auth/me`
pub async fn me(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(MeResponse {
        success: true,
        user,
    })
}
