//! Seed the database with the built-in catalog.
//!
//! Categories are the same six records the API seeds on first access, so
//! running this is only needed to populate a database ahead of traffic.
//! Products are the two demo records; the API never creates products.

use tracing::info;

use partshop_api::db::{self, PgStore, Store};
use partshop_api::fixtures;

use super::{CommandError, database_url};

async fn connect() -> Result<PgStore, CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");
    Ok(PgStore::new(pool))
}

/// Insert the default categories if none exist.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be reached or the insert fails.
pub async fn categories() -> Result<(), CommandError> {
    let store = connect().await?;

    let existing = store.count_categories().await?;
    if existing > 0 {
        info!(existing, "Categories already present, nothing to do");
        return Ok(());
    }

    let inserted = store
        .insert_categories(&fixtures::seed_categories())
        .await?;
    info!(inserted, "Seeded categories");
    Ok(())
}

/// Insert the demo products.
///
/// # Arguments
///
/// * `force` - Insert even when the product table is not empty
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be reached or the insert fails.
pub async fn products(force: bool) -> Result<(), CommandError> {
    let store = connect().await?;

    let existing = store.count_products().await?;
    if existing > 0 && !force {
        info!(existing, "Products already present, use --force to insert anyway");
        return Ok(());
    }

    let inserted = store.insert_products(&fixtures::seed_products()).await?;
    info!(inserted, "Seeded products");
    Ok(())
}
