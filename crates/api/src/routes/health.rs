//! Health check routes.

use axum::{extract::State, http::StatusCode};

use crate::db::DataSource;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Pings the store; demo mode has nothing to reach and is always ready.
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.data() {
        DataSource::Demo => StatusCode::OK,
        DataSource::Store(store) => match store.ping().await {
            Ok(()) => StatusCode::OK,
            Err(e) => {
                tracing::warn!(error = %e, "readiness check failed");
                StatusCode::SERVICE_UNAVAILABLE
            }
        },
    }
}
