//! Product types and listing queries.

use rust_decimal::Decimal;

use partshop_core::ProductId;

/// Number of products returned when the client does not ask for a limit.
pub const DEFAULT_PRODUCT_LIMIT: u32 = 12;

/// A catalog product (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Storage-native identifier.
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Category slug. Not enforced against the category table.
    pub category: String,
    pub in_stock: bool,
    pub image_url: Option<String>,
}

/// A product to be inserted (used by seeding tools).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub in_stock: bool,
    pub image_url: Option<String>,
}

/// Filter and limit for a product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Only return products whose category equals this slug.
    pub category: Option<String>,
    /// Maximum number of products to return.
    pub limit: u32,
}

impl ProductQuery {
    /// Build a query from raw request parameters.
    ///
    /// An empty category means "no filter". The limit defaults to
    /// [`DEFAULT_PRODUCT_LIMIT`]; any explicit value is kept as given.
    #[must_use]
    pub fn new(category: Option<String>, limit: Option<u32>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            limit: limit.unwrap_or(DEFAULT_PRODUCT_LIMIT),
        }
    }

    /// Whether a product passes the category filter.
    #[must_use]
    pub fn matches(&self, product_category: &str) -> bool {
        self.category
            .as_deref()
            .is_none_or(|wanted| wanted == product_category)
    }

    /// The limit as a `usize`, for slicing in-memory results.
    #[must_use]
    pub fn limit_usize(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = ProductQuery::default();
        assert_eq!(query.category, None);
        assert_eq!(query.limit, DEFAULT_PRODUCT_LIMIT);
    }

    #[test]
    fn test_empty_category_is_no_filter() {
        let query = ProductQuery::new(Some(String::new()), None);
        assert_eq!(query.category, None);
        assert!(query.matches("engine"));
    }

    #[test]
    fn test_explicit_limit_is_kept() {
        assert_eq!(ProductQuery::new(None, Some(5_000)).limit, 5_000);
        assert_eq!(ProductQuery::new(None, Some(0)).limit, 0);
    }

    #[test]
    fn test_matches_category() {
        let query = ProductQuery::new(Some("engine".to_owned()), None);
        assert!(query.matches("engine"));
        assert!(!query.matches("braking"));
    }
}
