//! Product listing route.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::QueryParams;
use crate::models::{Product, ProductQuery};
use crate::services::CatalogService;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsParams {
    /// Category slug to filter by. Empty means no filter.
    pub category: Option<String>,
    /// Maximum number of products (default 12).
    pub limit: Option<u32>,
}

/// Public product shape.
#[derive(Debug, Serialize)]
pub struct ProductOut {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub in_stock: bool,
    pub image_url: Option<String>,
}

impl From<Product> for ProductOut {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            in_stock: product.in_stock,
            image_url: product.image_url,
        }
    }
}

/// List products.
///
/// GET /api/products?category=engine&limit=12
///
/// # Errors
///
/// - 422 if the query string does not parse (e.g. a negative `limit`)
/// - 500 if the store fails
pub async fn index(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProductsParams>,
) -> Result<Json<Vec<ProductOut>>> {
    let query = ProductQuery::new(params.category, params.limit);
    let products = CatalogService::new(state.data()).products(&query).await?;
    Ok(Json(products.into_iter().map(ProductOut::from).collect()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::db::{MemoryStore, Store};
    use crate::fixtures;
    use crate::testing::{demo_app, get, store_app};

    fn categories(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["category"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_demo_products_shape() {
        let (status, body) = get(demo_app(), "/api/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "id": "1",
                    "title": "Carbon Intake Kit",
                    "description": "High-flow carbon fiber intake",
                    "price": 299.99,
                    "category": "engine",
                    "in_stock": true,
                    "image_url": null
                },
                {
                    "id": "2",
                    "title": "Drilled Brake Rotors",
                    "description": "Performance rotor pair",
                    "price": 189.5,
                    "category": "braking",
                    "in_stock": true,
                    "image_url": null
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_category_filter() {
        let (_, body) = get(demo_app(), "/api/products?category=engine").await;
        assert_eq!(categories(&body), ["engine"]);

        let (_, body) = get(demo_app(), "/api/products?category=").await;
        assert_eq!(categories(&body), ["engine", "braking"]);
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let (_, body) = get(demo_app(), "/api/products?limit=1").await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = get(demo_app(), "/api/products?limit=0").await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_negative_limit_rejected() {
        let (status, body) = get(demo_app(), "/api/products?limit=-1").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("query string"));
    }

    #[tokio::test]
    async fn test_store_products() {
        let store = MemoryStore::new();
        store
            .insert_products(&fixtures::seed_products())
            .await
            .unwrap();
        let app = store_app(store);

        let (status, body) = get(app, "/api/products?category=braking").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(categories(&body), ["braking"]);
        assert_eq!(body[0]["id"], "2");
        assert_eq!(body[0]["price"], 189.5);
    }
}
