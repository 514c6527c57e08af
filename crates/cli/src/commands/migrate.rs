//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! partshop-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build
//! time:
//! ```text
//! migrations/
//! ├── 20260301000001_create_catalog.sql
//! └── 20260301000002_create_user.sql
//! ```

use partshop_api::db;

use super::{CommandError, database_url};

/// Run the API database migrations.
///
/// # Errors
///
/// Returns `CommandError` if `DATABASE_URL` is missing, the database cannot be
/// reached, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
