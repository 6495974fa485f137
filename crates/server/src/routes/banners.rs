//! Home-page banners.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::state::AppState;

/// GET /api/banners
pub async fn index(State(state): State<AppState>) -> Result<Json<Value>> {
    let catalog = CatalogRepository::new(state.store());
    Ok(Json(json!({ "banners": catalog.banners()? })))
}
