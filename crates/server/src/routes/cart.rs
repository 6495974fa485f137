//! Server-side cart storage.
//!
//! Bodies follow the client wire contract: `productID`, not `product_id`.

use axum::{
    Json,
    extract::{Query, State},
};
use lustre_core::{Email, ProductId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::{CartRepository, CatalogRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::models::CartLineView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CartLineRequest {
    email: String,
    #[serde(rename = "productID")]
    product_id: ProductId,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct CartRemoveRequest {
    email: String,
    #[serde(rename = "productID")]
    product_id: ProductId,
}

fn known_user(state: &AppState, email: &Email) -> Result<()> {
    if UserRepository::new(state.store()).get(email)?.is_none() {
        return Err(AppError::NotFound("User not found".to_owned()));
    }
    Ok(())
}

/// POST /cart
///
/// Stores the received quantity verbatim, inserting the line when it is
/// new and overwriting the quantity when it is not.
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let request: CartLineRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid cart data".to_owned()))?;
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    known_user(&state, &email)?;
    if CatalogRepository::new(state.store())
        .product(request.product_id)?
        .is_none()
    {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }

    CartRepository::new(state.store()).upsert(&email, request.product_id, request.quantity)?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct CartShowParams {
    email: Option<String>,
}

/// GET /cart?email=...
///
/// Lines whose product has been removed from the catalog are skipped.
pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<CartShowParams>,
) -> Result<Json<Vec<CartLineView>>> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Email is required".to_owned()))?;
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    known_user(&state, &email)?;

    let catalog = CatalogRepository::new(state.store());
    let lines = CartRepository::new(state.store())
        .entries(&email)?
        .into_iter()
        .filter_map(|entry| {
            match catalog.product(entry.product_id) {
                Ok(product) => product.map(|product| {
                    Ok(CartLineView {
                        product,
                        quantity: entry.quantity,
                    })
                }),
                Err(e) => Some(Err(AppError::from(e))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(lines))
}

/// DELETE /cart
pub async fn remove(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let request: CartRemoveRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid cart data".to_owned()))?;
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    known_user(&state, &email)?;

    CartRepository::new(state.store()).remove(&email, request.product_id)?;
    Ok(Json(json!({ "success": true })))
}
