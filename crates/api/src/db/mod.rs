//! Persistence for the Partshop backend.
//!
//! # Store port
//!
//! Everything the facade needs from a database goes through the [`Store`]
//! trait. Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx (schema `partshop`)
//! - [`MemoryStore`] - in-process, same semantics; local development and tests
//!
//! Which one (if any) backs the service is decided once at startup and
//! captured in a [`DataSource`]. When no store is available the service runs
//! in demo mode.
//!
//! ## Tables
//!
//! - `category` - Seeded on first access when empty
//! - `product` - Read-only over HTTP
//! - `user` - Created on signup, read on login
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p partshop-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use partshop_core::Email;

use crate::config::{ApiConfig, StoreMode};
use crate::models::{Category, NewCategory, NewProduct, NewUser, Product, ProductQuery, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Which implementation is behind a [`DataSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
    Demo,
}

impl StoreKind {
    /// Name reported by the diagnostics endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
            Self::Demo => "demo",
        }
    }
}

/// Persistence port used by the catalog and auth services.
#[async_trait]
pub trait Store: Send + Sync {
    /// Implementation behind this store.
    fn kind(&self) -> StoreKind;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Number of stored categories.
    async fn count_categories(&self) -> Result<u64, RepositoryError>;

    /// Insert categories, skipping any whose slug already exists.
    ///
    /// Returns the number of rows actually inserted.
    async fn insert_categories(&self, categories: &[NewCategory]) -> Result<u64, RepositoryError>;

    /// All categories in insertion order.
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Number of stored products.
    async fn count_products(&self) -> Result<u64, RepositoryError>;

    /// Products matching the query's category filter, at most `query.limit`.
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError>;

    /// Insert products. Returns the number of rows inserted.
    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, RepositoryError>;

    /// Look up a user by email.
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Look up a user together with their password hash.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;

    /// Insert a new user.
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Collections (tables) that currently exist, sorted by name.
    async fn list_collections(&self) -> Result<Vec<String>, RepositoryError>;
}

/// Where the facade reads and writes data.
///
/// Selected once at startup; handlers never probe for a database per call.
#[derive(Clone)]
pub enum DataSource {
    /// No store configured: static reads, writes accepted without persistence.
    Demo,
    /// A real (or in-memory) store.
    Store(Arc<dyn Store>),
}

impl DataSource {
    /// Wrap a store.
    #[must_use]
    pub fn store(store: impl Store + 'static) -> Self {
        Self::Store(Arc::new(store))
    }

    /// Implementation behind this data source.
    #[must_use]
    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Demo => StoreKind::Demo,
            Self::Store(store) => store.kind(),
        }
    }

    /// Select the data source described by the configuration.
    ///
    /// In `auto` mode a database that cannot be reached at startup degrades
    /// to demo mode with a warning. An explicit `postgres` mode fails instead.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if `STORE_MODE=postgres` and the pool cannot be
    /// created.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, sqlx::Error> {
        match (config.store_mode, config.database_url.as_ref()) {
            (StoreMode::Demo, _) | (StoreMode::Auto, None) => {
                tracing::warn!("no database configured, serving demo data");
                Ok(Self::Demo)
            }
            (StoreMode::Memory, _) => {
                tracing::info!("using in-memory store");
                Ok(Self::store(MemoryStore::new()))
            }
            (StoreMode::Postgres, None) => Err(sqlx::Error::Configuration(
                "STORE_MODE=postgres requires DATABASE_URL".into(),
            )),
            (StoreMode::Postgres, Some(url)) => {
                let pool = create_pool(url).await?;
                tracing::info!("Database pool created");
                Ok(Self::store(PgStore::new(pool)))
            }
            (StoreMode::Auto, Some(url)) => match create_pool(url).await {
                Ok(pool) => {
                    tracing::info!("Database pool created");
                    Ok(Self::store(PgStore::new(pool)))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "database unreachable, falling back to demo data");
                    Ok(Self::Demo)
                }
            },
        }
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DataSource").field(&self.kind()).finish()
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
