//! `PostgreSQL` implementation of the store port.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use partshop_core::{Email, ProductId, UserId};

use super::{RepositoryError, Store, StoreKind};
use crate::models::{Category, NewCategory, NewProduct, NewUser, Product, ProductQuery, User};

/// Maximum number of collections reported by diagnostics.
const MAX_REPORTED_COLLECTIONS: i64 = 10;

/// Store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    name: String,
    slug: String,
    description: Option<String>,
    icon: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            name: row.name,
            slug: row.slug,
            description: row.description,
            icon: row.icon,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    title: String,
    description: Option<String>,
    price: Decimal,
    category: String,
    in_stock: bool,
    image_url: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category: row.category,
            in_stock: row.in_stock,
            image_url: row.image_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let user = User {
            id: self.id,
            name: self.name,
            email,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        Ok((user, self.password_hash))
    }
}

fn to_count(n: i64) -> Result<u64, RepositoryError> {
    u64::try_from(n).map_err(|_| RepositoryError::DataCorruption(format!("negative count: {n}")))
}

#[async_trait]
impl Store for PgStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Postgres
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn count_categories(&self) -> Result<u64, RepositoryError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM partshop.category")
            .fetch_one(&self.pool)
            .await?;
        to_count(n)
    }

    async fn insert_categories(&self, categories: &[NewCategory]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for category in categories {
            let result = sqlx::query(
                r"
                INSERT INTO partshop.category (name, slug, description, icon)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (slug) DO NOTHING
                ",
            )
            .bind(&category.name)
            .bind(&category.slug)
            .bind(category.description.as_deref())
            .bind(category.icon.as_deref())
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT name, slug, description, icon
            FROM partshop.category
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn count_products(&self) -> Result<u64, RepositoryError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM partshop.product")
            .fetch_one(&self.pool)
            .await?;
        to_count(n)
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, title, description, price, category, in_stock, image_url
            FROM partshop.product
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY id ASC
            LIMIT $2
            ",
        )
        .bind(query.category.as_deref())
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for product in products {
            let result = sqlx::query(
                r"
                INSERT INTO partshop.product
                    (title, description, price, category, in_stock, image_url)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(&product.title)
            .bind(product.description.as_deref())
            .bind(product.price)
            .bind(&product.category)
            .bind(product.in_stock)
            .bind(product.image_url.as_deref())
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .find_credentials(email)
            .await?
            .map(|(user, _)| user))
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, is_active, created_at, updated_at
            FROM partshop."user"
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO partshop."user" (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, is_active, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_user().map(|(user, _)| user)
    }

    async fn list_collections(&self) -> Result<Vec<String>, RepositoryError> {
        let collections: Vec<String> = sqlx::query_scalar(
            r"
            SELECT table_name::TEXT
            FROM information_schema.tables
            WHERE table_schema = 'partshop'
            ORDER BY table_name
            LIMIT $1
            ",
        )
        .bind(MAX_REPORTED_COLLECTIONS)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }
}
