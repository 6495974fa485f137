//! Product listing, product detail, reviews and categories.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use lustre_core::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::{Product, Review};
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub category_id: Option<i64>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub has_discount: Option<bool>,
    pub search: Option<String>,
    /// Comma-separated product ids, e.g. `ids=1,3,5`.
    pub ids: Option<String>,
}

/// Paged product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    /// Total matches before paging.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

fn parse_ids(csv: &str) -> Result<Vec<ProductId>> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map(ProductId::new)
                .map_err(|_| AppError::BadRequest(format!("Invalid product id: {s}")))
        })
        .collect()
}

fn matches(product: &Product, params: &ProductListParams) -> bool {
    if let Some(category_id) = params.category_id {
        if product.category_id != CategoryId::new(category_id) {
            return false;
        }
    }
    if let Some(from) = params.price_from {
        if product.price < from {
            return false;
        }
    }
    if let Some(to) = params.price_to {
        if product.price > to {
            return false;
        }
    }
    if params.has_discount == Some(true) && product.discount == 0 {
        return false;
    }
    if let Some(search) = &params.search {
        let needle = search.to_lowercase();
        if !product.name.to_lowercase().contains(&needle)
            && !product.short_description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

/// GET /api/products
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<ProductListResponse>> {
    let catalog = CatalogRepository::new(state.store());

    let mut products = match &params.ids {
        Some(csv) => catalog.products_by_ids(&parse_ids(csv)?)?,
        None => catalog.products()?,
    };
    products.retain(|p| matches(p, &params));

    let total = products.len();
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let products: Vec<Product> = products.into_iter().skip(offset).take(limit).collect();

    Ok(Json(ProductListResponse {
        products,
        total,
        limit,
        offset,
    }))
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let catalog = CatalogRepository::new(state.store());
    let id = ProductId::new(id);
    let product = catalog
        .product(id)?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
    let reviews = catalog.reviews(id)?;
    Ok(Json(json!({ "product": product, "reviews": reviews })))
}

#[derive(Debug, Deserialize)]
struct ReviewRequest {
    name: String,
    text: String,
    rating: i64,
}

/// POST /api/products/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Review>)> {
    let request: ReviewRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Invalid review data".to_owned()))?;

    if request.name.trim().is_empty()
        || request.text.trim().is_empty()
        || !(1..=5).contains(&request.rating)
    {
        return Err(AppError::BadRequest("Invalid review data".to_owned()));
    }

    let catalog = CatalogRepository::new(state.store());
    let id = ProductId::new(id);
    if catalog.product(id)?.is_none() {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }

    let review = catalog.add_review(id, request.name.trim(), request.text.trim(), request.rating)?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/categories
pub async fn categories(State(state): State<AppState>) -> Result<Json<Value>> {
    let catalog = CatalogRepository::new(state.store());
    Ok(Json(json!({ "categories": catalog.categories()? })))
}
