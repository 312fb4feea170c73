//! Shoplist server library.
//!
//! This crate provides the server functionality as a library, allowing
//! it to be tested and reused. [`app`] assembles the full router so the
//! binary and the integration tests serve exactly the same application.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::{
    Json,
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the application router.
///
/// Serves the JSON API, the uploaded images under `/uploads`, and a JSON
/// 404 fallback for unknown routes.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.images().root().to_path_buf());

    Router::new()
        .route("/api/health", get(health))
        .merge(routes::routes())
        .nest_service("/uploads", uploads)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    success: bool,
    message: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// Liveness health check endpoint.
///
/// Returns a success marker if the server is running. Does not check
/// dependencies.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        success: true,
        message: "Server is running",
        timestamp: chrono::Utc::now(),
    })
}

/// JSON 404 fallback for unknown routes.
#[derive(Debug, Serialize)]
struct NotFoundResponse {
    success: bool,
    message: &'static str,
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            message: "Route not found",
        }),
    )
}
