//! Route definitions for the API.

pub mod auth;
pub mod lists;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// All API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/shopping-lists", get(lists::index).post(lists::create))
        .route(
            "/api/shopping-lists/{id}",
            get(lists::show).delete(lists::destroy),
        )
        .route("/api/shopping-lists/{id}/products", post(lists::add_product))
        .route(
            "/api/shopping-lists/{id}/products/{product_id}",
            put(lists::update_product).delete(lists::remove_product),
        )
}
