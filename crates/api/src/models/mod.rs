//! Domain models for the Partshop backend.
//!
//! These types are what the store port speaks. Route handlers project them
//! into the public JSON shapes.

pub mod category;
pub mod product;
pub mod user;

pub use category::{Category, NewCategory};
pub use product::{DEFAULT_PRODUCT_LIMIT, NewProduct, Product, ProductQuery};
pub use user::{NewUser, User};
