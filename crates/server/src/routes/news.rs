//! News items.

use axum::{Json, extract::State};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::models::News;
use crate::state::AppState;

/// GET /api/news
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<News>>> {
    let catalog = CatalogRepository::new(state.store());
    Ok(Json(catalog.news()?))
}
