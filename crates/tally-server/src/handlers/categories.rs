//! Category handlers

use axum::Json;

use tally_core::models::Category;

/// GET /api/categories - The fixed category list in display order
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}
