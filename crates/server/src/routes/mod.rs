//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Health check
//!
//! # Cart
//! POST   /cart                      - Upsert a cart line
//! GET    /cart?email=...            - Fetch cart with products embedded
//! DELETE /cart                      - Remove a cart line
//!
//! # Catalog
//! GET    /api/products              - Product listing (filters, paging)
//! GET    /api/products/{id}         - Product detail with reviews
//! POST   /api/products/{id}/reviews - Add a review
//! GET    /api/categories            - Category listing
//! GET    /api/banners               - Home-page banners
//! GET    /api/news                  - News items
//!
//! # Favorites
//! POST   /api/favorites             - Replace the favorites list
//! GET    /api/favorites?email=...   - Fetch the favorites list
//!
//! # Users and orders
//! POST   /api/auth/register         - Register a user
//! POST   /api/orders                - Place an order
//! GET    /api/orders?email=...      - Order history
//! ```

pub mod auth;
pub mod banners;
pub mod cart;
pub mod favorites;
pub mod news;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

async fn health() -> &'static str {
    "OK"
}

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/products/{id}/reviews", post(products::create_review))
        .route("/categories", get(products::categories))
        .route("/banners", get(banners::index))
        .route("/news", get(news::index))
        .route("/favorites", post(favorites::save).get(favorites::show))
        .route("/auth/register", post(auth::register))
        .route("/orders", post(orders::create).get(orders::index))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Cart lives at the root, not under /api.
        .route(
            "/cart",
            post(cart::save).get(cart::show).delete(cart::remove),
        )
        .nest("/api", api_routes())
}
