//! Order placement and history.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use lustre_core::{Email, ProductId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::{CatalogRepository, OrderRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct OrderRequest {
    email: String,
    product_ids: Vec<ProductId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    delivery_address: String,
}

/// POST /api/orders
///
/// Placing an order registers the user on the fly when the email is
/// unknown, and refreshes the delivery profile when it is.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let request: OrderRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid order data".to_owned()))?;
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if request.product_ids.is_empty() {
        return Err(AppError::BadRequest(
            "Order must contain at least one product".to_owned(),
        ));
    }

    let users = UserRepository::new(state.store());
    let user = match users.update_profile(
        &email,
        request.name.trim(),
        request.phone.trim(),
        request.delivery_address.trim(),
    )? {
        Some(user) => user,
        None => users.create(
            &email,
            request.name.trim(),
            request.phone.trim(),
            request.delivery_address.trim(),
        )?,
    };

    let orders = OrderRepository::new(state.store());
    let mut order = orders.create(user.id, &email, request.product_ids)?;
    order.products = CatalogRepository::new(state.store()).products_by_ids(&order.product_ids)?;

    Ok((StatusCode::CREATED, Json(json!({ "order": order }))))
}

#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    email: Option<String>,
}

/// GET /api/orders?email=...
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> Result<Json<Value>> {
    let email = params
        .email
        .ok_or_else(|| AppError::BadRequest("Email is required".to_owned()))?;
    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let users = UserRepository::new(state.store());
    if users.get(&email)?.is_none() {
        return Err(AppError::NotFound("User not found".to_owned()));
    }

    let catalog = CatalogRepository::new(state.store());
    let mut orders = OrderRepository::new(state.store()).list(&email)?;
    for order in &mut orders {
        order.products = catalog.products_by_ids(&order.product_ids)?;
    }

    Ok(Json(json!({ "orders": orders })))
}
