//! Core types for Partshop.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::*;
