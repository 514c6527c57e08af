//! Integration tests for the `PostgreSQL` store.
//!
//! These tests require `DATABASE_URL` pointing at a migrated database
//! (cargo run -p partshop-cli -- migrate). Every test uses fresh slugs and
//! emails so runs can share a database.
//!
//! Run with: cargo test -p partshop-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use partshop_api::db::{DataSource, RepositoryError, Store};
use partshop_api::models::{NewCategory, NewProduct, NewUser, ProductQuery};
use partshop_api::services::{AuthError, AuthService, SignupOutcome};
use partshop_core::Email;
use partshop_integration_tests::{pg_store, unique_email, unique_slug};
use rust_decimal::Decimal;

fn category(slug: &str) -> NewCategory {
    NewCategory {
        name: "Integration".to_string(),
        slug: slug.to_string(),
        description: None,
        icon: Some("Cog".to_string()),
    }
}

fn product(title: &str, category: &str) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        description: None,
        price: Decimal::new(4_995, 2),
        category: category.to_string(),
        in_stock: true,
        image_url: None,
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_categories_skips_existing_slug() {
    let store = pg_store().await;
    let slug = unique_slug("it-category");

    let first = store.insert_categories(&[category(&slug)]).await.unwrap();
    let second = store.insert_categories(&[category(&slug)]).await.unwrap();
    assert_eq!((first, second), (1, 0));

    let listed = store.list_categories().await.unwrap();
    assert_eq!(listed.iter().filter(|c| c.slug == slug).count(), 1);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_user_duplicate_is_conflict() {
    let store = pg_store().await;
    let email = Email::parse(&unique_email()).unwrap();
    let new_user = || NewUser {
        name: "Integration".to_string(),
        email: email.clone(),
        password_hash: "hash".to_string(),
    };

    let created = store.insert_user(new_user()).await.unwrap();
    assert!(created.is_active);

    let err = store.insert_user(new_user()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_list_products_filters_and_limits() {
    let store = pg_store().await;
    let slug = unique_slug("it-product");
    let products: Vec<NewProduct> = ["Turbo", "Intercooler", "Oil Cooler"]
        .into_iter()
        .map(|title| product(title, &slug))
        .collect();
    assert_eq!(store.insert_products(&products).await.unwrap(), 3);

    let limited = store
        .list_products(&ProductQuery::new(Some(slug.clone()), Some(2)))
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert!(limited.iter().all(|p| p.category == slug));
    assert!(limited[0].id < limited[1].id);

    let all = store
        .list_products(&ProductQuery::new(Some(slug.clone()), Some(500)))
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].price, Decimal::new(4_995, 2));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_signups_create_one_user() {
    let source = DataSource::store(pg_store().await);
    let auth = AuthService::new(&source);
    let email = unique_email();

    let (first, second) = tokio::join!(
        auth.signup("First", &email, "pw-one"),
        auth.signup("Second", &email, "pw-two"),
    );
    let results = [first, second];
    let created = results
        .iter()
        .filter(|r| matches!(r, Ok(SignupOutcome::Created(_))))
        .count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(AuthError::UserAlreadyExists)))
        .count();
    assert_eq!((created, duplicates), (1, 1));
}
