//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Greeting
//! GET  /test                - Backend/database diagnostics
//! GET  /health              - Liveness
//! GET  /health/ready        - Readiness (store ping)
//!
//! # API
//! GET  /api/hello           - Greeting
//! GET  /api/categories      - Category listing (seeds an empty store)
//! GET  /api/products        - Product listing (?category=&limit=)
//! POST /api/auth/signup     - Create a user
//! POST /api/auth/login      - Check credentials
//! ```

pub mod auth;
pub mod categories;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(home::hello))
        .route("/categories", get(categories::index))
        .route("/products", get(products::index))
        .nest("/auth", auth_routes())
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root))
        .route("/test", get(home::diagnostics))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
