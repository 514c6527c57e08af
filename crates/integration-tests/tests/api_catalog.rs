//! Integration tests for the catalog endpoints.
//!
//! These tests require the API server running (cargo run -p partshop-api).
//!
//! Run with: cargo test -p partshop-integration-tests -- --ignored

use partshop_integration_tests::{client, url};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn get_json(path: &str) -> (StatusCode, Value) {
    let resp = client()
        .get(url(path))
        .send()
        .await
        .expect("Failed to send request");
    let status = resp.status();
    let body = resp.json().await.expect("Failed to parse JSON");
    (status, body)
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_health() {
    let resp = client()
        .get(url("/health"))
        .send()
        .await
        .expect("Failed to reach /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = client()
        .get(url("/health/ready"))
        .send()
        .await
        .expect("Failed to reach /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_greetings() {
    let (status, body) = get_json("/api/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello from the backend API!" }));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_categories_are_stable() {
    let (status, first) = get_json("/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = get_json("/api/categories").await;
    assert_eq!(first, second);

    let slugs: Vec<&str> = first
        .as_array()
        .expect("categories should be an array")
        .iter()
        .filter_map(|c| c["slug"].as_str())
        .collect();
    assert!(slugs.contains(&"engine"));
    assert!(slugs.contains(&"braking"));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_products_filter_and_limit() {
    let (status, body) = get_json("/api/products?category=engine&limit=5").await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().expect("products should be an array");
    assert!(products.len() <= 5);
    assert!(products.iter().all(|p| p["category"] == "engine"));
    assert!(products.iter().all(|p| p["id"].is_string()));

    let (_, body) = get_json("/api/products?limit=0").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_diagnostics_report() {
    let (status, body) = get_json("/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "✅ Running");
    assert!(body["collections"].is_array());
}
