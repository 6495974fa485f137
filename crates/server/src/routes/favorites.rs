//! Server-side favorites storage.
//!
//! The protocol is replace-whole-list; the body carries `productIDs`.

use axum::{
    Json,
    extract::{Query, State},
};
use lustre_core::{Email, ProductId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::{FavoritesRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct FavoritesRequest {
    email: String,
    #[serde(rename = "productIDs")]
    product_ids: Vec<ProductId>,
}

fn known_user(state: &AppState, email: &Email) -> Result<()> {
    if UserRepository::new(state.store()).get(email)?.is_none() {
        return Err(AppError::NotFound("User not found".to_owned()));
    }
    Ok(())
}

/// POST /api/favorites
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let request: FavoritesRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid favorites data".to_owned()))?;
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    known_user(&state, &email)?;

    FavoritesRepository::new(state.store()).set(&email, &request.product_ids)?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct FavoritesShowParams {
    email: Option<String>,
}

/// GET /api/favorites?email=...
///
/// A user who never saved a list gets an empty one.
pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<FavoritesShowParams>,
) -> Result<Json<Vec<ProductId>>> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Email is required".to_owned()))?;
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    known_user(&state, &email)?;

    let ids = FavoritesRepository::new(state.store())
        .get(&email)?
        .unwrap_or_default();
    Ok(Json(ids))
}
