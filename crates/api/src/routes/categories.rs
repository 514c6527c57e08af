//! Category listing route.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::models::Category;
use crate::services::CatalogService;
use crate::state::AppState;

/// List all categories.
///
/// GET /api/categories
///
/// # Errors
///
/// Returns `AppError::Database` (500) if the store fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogService::new(state.data()).categories().await?;
    Ok(Json(categories))
}
