//! In-process store.
//!
//! Behaves like [`PgStore`](super::PgStore): it persists writes (for the
//! lifetime of the process), enforces unique slugs and emails, and assigns
//! increasing IDs. Catalog rows carry the same `created_at`/`updated_at`
//! stamps as the table columns. Every operation takes the lock once, so a check and the
//! write that depends on it cannot interleave with another request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use partshop_core::{Email, ProductId, UserId};

use super::{RepositoryError, Store, StoreKind};
use crate::models::{Category, NewCategory, NewProduct, NewUser, Product, ProductQuery, User};

/// In-memory implementation of [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

/// A stored row with its insertion timestamps.
#[derive(Debug, Clone)]
struct Stamped<T> {
    row: T,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<T> Stamped<T> {
    fn new(row: T) -> Self {
        let now = Utc::now();
        Self {
            row,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<Stamped<Category>>,
    products: Vec<Stamped<Product>>,
    users: Vec<(User, String)>,
    next_product_id: i64,
    next_user_id: i64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryState {
    fn collections(&self) -> Vec<String> {
        [
            ("category", self.categories.is_empty()),
            ("product", self.products.is_empty()),
            ("user", self.users.is_empty()),
        ]
        .into_iter()
        .filter(|&(_, empty)| !empty)
        .map(|(name, _)| name.to_owned())
        .collect()
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn count_categories(&self) -> Result<u64, RepositoryError> {
        Ok(count(self.state.read().await.categories.len()))
    }

    async fn insert_categories(&self, categories: &[NewCategory]) -> Result<u64, RepositoryError> {
        let mut state = self.state.write().await;
        let mut inserted = 0;
        for new in categories {
            if state.categories.iter().any(|c| c.row.slug == new.slug) {
                continue;
            }
            state
                .categories
                .push(Stamped::new(Category::from(new.clone())));
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().map(|c| c.row.clone()).collect())
    }

    async fn count_products(&self) -> Result<u64, RepositoryError> {
        Ok(count(self.state.read().await.products.len()))
    }

    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .map(|p| &p.row)
            .filter(|p| query.matches(&p.category))
            .take(query.limit_usize())
            .cloned()
            .collect())
    }

    async fn insert_products(&self, products: &[NewProduct]) -> Result<u64, RepositoryError> {
        let mut state = self.state.write().await;
        for new in products {
            state.next_product_id += 1;
            let id = ProductId::new(state.next_product_id);
            state.products.push(Stamped::new(Product {
                id,
                title: new.title.clone(),
                description: new.description.clone(),
                price: new.price,
                category: new.category.clone(),
                in_stock: new.in_stock,
                image_url: new.image_url.clone(),
            }));
        }
        Ok(count(products.len()))
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
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|(user, _)| &user.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        state.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: UserId::new(state.next_user_id),
            name: user.name,
            email: user.email,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.users.push((created.clone(), user.password_hash));
        Ok(created)
    }

    async fn list_collections(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.state.read().await.collections())
    }
}
