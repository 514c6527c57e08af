//! Catalog service: categories and products.

use crate::db::{DataSource, RepositoryError};
use crate::fixtures;
use crate::models::{Category, Product, ProductQuery};

/// Read access to the catalog.
pub struct CatalogService<'a> {
    source: &'a DataSource,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(source: &'a DataSource) -> Self {
        Self { source }
    }

    /// List all categories.
    ///
    /// Demo mode returns the six static categories. With a store, the default
    /// categories are seeded the first time the collection is found empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails while counting, seeding,
    /// or listing. Nothing is retried.
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let store = match self.source {
            DataSource::Demo => return Ok(fixtures::demo_categories()),
            DataSource::Store(store) => store,
        };

        if store.count_categories().await? == 0 {
            let inserted = store
                .insert_categories(&fixtures::seed_categories())
                .await?;
            tracing::info!(
                inserted,
                store = store.kind().as_str(),
                "seeded default categories"
            );
        }

        store.list_categories().await
    }

    /// List products, optionally filtered by category slug.
    ///
    /// The result never exceeds `query.limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store query fails.
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        tracing::debug!(category = ?query.category, limit = query.limit, "listing products");

        match self.source {
            DataSource::Demo => Ok(fixtures::demo_products()
                .into_iter()
                .filter(|p| query.matches(&p.category))
                .take(query.limit_usize())
                .collect()),
            DataSource::Store(store) => store.list_products(query).await,
        }
    }
}
