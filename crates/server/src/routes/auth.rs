//! User registration.

use axum::{Json, extract::State, http::StatusCode};
use lustre_core::Email;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    delivery_address: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let request: RegisterRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid registration data".to_owned()))?;
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let users = UserRepository::new(state.store());
    if users.get(&email)?.is_some() {
        return Err(AppError::BadRequest("User already exists".to_owned()));
    }

    let user = users.create(
        &email,
        request.name.trim(),
        request.phone.trim(),
        request.delivery_address.trim(),
    )?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}
