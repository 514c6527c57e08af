//! Integration tests for signup and login.
//!
//! These tests require the API server running (cargo run -p partshop-api).
//! Assertions depend on the server's store, read from `GET /test`.
//!
//! Run with: cargo test -p partshop-integration-tests -- --ignored

use partshop_integration_tests::{client, store_kind, unique_email, url};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn post_json(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let resp = client
        .post(url(path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = resp.status();
    let body = resp.json().await.expect("Failed to parse JSON");
    (status, body)
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_signup_duplicate_and_login() {
    let client = client();
    let email = unique_email();
    let demo = store_kind(&client).await == "demo";

    let signup = json!({ "name": "Integration", "email": email, "password": "s3cret" });
    let (status, body) = post_json(&client, "/api/auth/signup", signup.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, body) = post_json(&client, "/api/auth/signup", signup).await;
    if demo {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Signed up (demo mode)");
    } else {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Email already registered" }));
    }

    let (status, body) = post_json(
        &client,
        "/api/auth/login",
        json!({ "email": email, "password": "wrong" }),
    )
    .await;
    if demo {
        assert_eq!(status, StatusCode::OK);
    } else {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "detail": "Invalid credentials" }));
    }

    let (status, body) = post_json(
        &client,
        "/api/auth/login",
        json!({ "email": email, "password": "s3cret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    if !demo {
        assert_eq!(body["name"], "Integration");
        assert!(body["user_id"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_invalid_email_rejected() {
    let (status, body) = post_json(
        &client(),
        "/api/auth/login",
        json!({ "email": "not-an-email", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "detail": "Invalid email address" }));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_concurrent_signups_one_wins() {
    let client = client();
    if store_kind(&client).await == "demo" {
        return;
    }
    let signup = json!({ "name": "Racer", "email": unique_email(), "password": "pw" });

    let (first, second) = tokio::join!(
        post_json(&client, "/api/auth/signup", signup.clone()),
        post_json(&client, "/api/auth/signup", signup),
    );
    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_missing_field_has_json_detail() {
    let (status, body) = post_json(
        &client(),
        "/api/auth/signup",
        json!({ "email": unique_email(), "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}
