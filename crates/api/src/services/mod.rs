//! Business logic services: the data access facade.
//!
//! # Services
//!
//! - `catalog` - Category listing (with first-access seeding) and product listing
//! - `auth` - Signup and login
//!
//! Both services borrow the startup-selected [`DataSource`](crate::db::DataSource)
//! and branch on it: a store is queried, demo mode answers from fixtures.

pub mod auth;
pub mod catalog;

pub use auth::{AuthError, AuthService, LoginOutcome, SignupOutcome};
pub use catalog::CatalogService;
