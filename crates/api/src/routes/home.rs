//! Greeting and diagnostics routes.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::DataSource;
use crate::state::AppState;

/// Longest store error excerpt shown by the diagnostics endpoint.
const MAX_ERROR_EXCERPT: usize = 50;

/// Greeting payload.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Root greeting.
///
/// GET /
pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Hello from the Partshop backend!",
    })
}

/// API greeting.
///
/// GET /api/hello
pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend API!",
    })
}

/// Diagnostics report.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub connection_status: &'static str,
    pub store: &'static str,
    pub collections: Vec<String>,
}

const fn presence(set: bool) -> &'static str {
    if set { "✅ Set" } else { "❌ Not Set" }
}

/// Report backend and database status.
///
/// GET /test
///
/// Always answers 200; a failing store is described in the body.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let config = state.config();
    let mut report = Diagnostics {
        backend: "✅ Running",
        database: "❌ Not Available (demo mode)".to_owned(),
        database_url: presence(config.database_url.is_some()),
        database_name: presence(config.database_name.is_some()),
        connection_status: "Not Connected",
        store: state.data().kind().as_str(),
        collections: Vec::new(),
    };

    if let DataSource::Store(store) = state.data() {
        report.connection_status = "Connected";
        match store.list_collections().await {
            Ok(collections) => {
                report.database = "✅ Connected & Working".to_owned();
                report.collections = collections;
            }
            Err(e) => {
                tracing::warn!(error = %e, "diagnostics query failed");
                let excerpt: String = e.to_string().chars().take(MAX_ERROR_EXCERPT).collect();
                report.database = format!("⚠️  Connected but Error: {excerpt}");
            }
        }
    }

    Json(report)
}
