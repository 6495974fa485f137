//! Domain and wire types for the storefront API.
//!
//! Field names follow the JSON contract the clients expect: snake_case for
//! catalog entities, `productID`/`productIDs` on the cart and favorites
//! request bodies (those live with their route handlers).

use chrono::{DateTime, Utc};
use lustre_core::{BannerId, CategoryId, Email, NewsId, OrderId, ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-friendly identifier, e.g. `earrings`.
    pub alias: String,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub short_description: String,
    pub long_description: String,
    pub sku: String,
    /// Discount percentage, 0 when not discounted.
    pub discount: i64,
    pub images: Vec<String>,
    pub category_id: CategoryId,
    /// Embedded category, populated on read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub name: String,
    pub text: String,
    /// 1 to 5 stars.
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

/// A home-page banner pointing at a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    pub product_id: ProductId,
    pub image: String,
    pub position: i64,
    /// Embedded product, populated on read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// A news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: NewsId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// A registered storefront user.
///
/// Credentials are out of scope; users exist so carts, favorites and
/// orders have an owner to key on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_ids: Vec<ProductId>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Embedded products, populated on read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

/// One stored cart line: product reference plus quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// One cart line as returned by `GET /cart`, with the product embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub product: Product,
    pub quantity: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_snake_case() {
        let product = Product {
            id: ProductId::new(1),
            name: "Lira Earrings".to_owned(),
            price: 1540.0,
            short_description: "short".to_owned(),
            long_description: "long".to_owned(),
            sku: "12".to_owned(),
            discount: 0,
            images: vec!["/images/jewelry/liras1.jpg".to_owned()],
            category_id: CategoryId::new(1),
            category: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["short_description"], "short");
        assert_eq!(json["category_id"], 1);
        // Unpopulated category is omitted entirely.
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_cart_entry_roundtrip() {
        let entry = CartEntry {
            product_id: ProductId::new(3),
            quantity: 2,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: CartEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
