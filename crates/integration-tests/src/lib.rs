//! Integration tests for Partshop.
//!
//! Black-box tests that talk to a running `partshop-api` over HTTP, plus
//! store tests that talk to `PostgreSQL` directly. They are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server (any STORE_MODE)
//! cargo run -p partshop-api
//!
//! # Run integration tests
//! cargo test -p partshop-integration-tests -- --ignored
//! ```
//!
//! `PARTSHOP_BASE_URL` overrides the default `http://localhost:8000`.
//! The store tests read `DATABASE_URL` and expect a migrated schema
//! (`cargo run -p partshop-cli -- migrate`).

use partshop_api::db::{PgStore, create_pool};
use reqwest::Client;
use secrecy::SecretString;
use serde_json::Value;

/// Base URL of the API under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PARTSHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Build a URL for a path on the API under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url().trim_end_matches('/'))
}

/// Create an HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Which store the running server uses, as reported by `GET /test`.
///
/// # Panics
///
/// Panics if the server cannot be reached or the report is malformed.
#[allow(clippy::expect_used)]
pub async fn store_kind(client: &Client) -> String {
    let report: Value = client
        .get(url("/test"))
        .send()
        .await
        .expect("Failed to reach /test")
        .json()
        .await
        .expect("Failed to parse diagnostics");

    report["store"]
        .as_str()
        .expect("diagnostics missing store")
        .to_string()
}

/// A unique email address for a test run.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", uuid::Uuid::new_v4().simple())
}

/// A `PgStore` connected to `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable.
#[allow(clippy::expect_used)]
pub async fn pg_store() -> PgStore {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&SecretString::from(database_url))
        .await
        .expect("Failed to connect to database");
    PgStore::new(pool)
}

/// A slug no other test run will use.
#[must_use]
pub fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
