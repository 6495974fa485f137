//! The shopping cart session.
//!
//! Holds the in-memory cart for one client session and mirrors mutations
//! to the server when an identity is signed in. See the crate docs for the
//! local-first synchronization model.

use lustre_core::{Email, ProductId};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::identity::Identity;

/// Catalog product as the cart sees it.
///
/// Only the fields the cart computes with are modeled; everything else the
/// server sends (descriptions, images, category, timestamps) rides along
/// in `metadata` so a restore-save cycle never drops it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Totals are plain multiplication - no currency rounding.
    pub price: f64,
    /// Discount percentage; informational only, never applied to totals.
    #[serde(default)]
    pub discount: i64,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// One product-quantity pairing in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

/// In-memory cart with best-effort server mirroring.
///
/// At most one line exists per product id; lines keep the order in which
/// their product was first added. Quantities are taken at face value -
/// callers are responsible for passing positive amounts, and non-positive
/// values are stored verbatim.
pub struct CartSession {
    lines: Vec<CartLine>,
    api: ApiClient,
    identity: Identity,
}

impl CartSession {
    /// Create an empty cart for the given identity.
    #[must_use]
    pub fn new(api: ApiClient, identity: Identity) -> Self {
        Self {
            lines: Vec::new(),
            api,
            identity,
        }
    }

    /// Add a product to the cart, aggregating with any existing line.
    ///
    /// An existing line for the same product id has its quantity
    /// incremented; otherwise a new line is appended.
    pub fn add(&mut self, product: Product, quantity: i64) {
        let product_id = product.id;
        match self.lines.iter_mut().find(|l| l.product.id == product_id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine { product, quantity }),
        }
        // The push carries the just-added amount, not the aggregated line
        // total. The server stores the received value verbatim for an
        // existing line, so repeated adds leave the remote copy behind the
        // local one until the next restore (see the drift integration
        // test).
        self.mirror_save(product_id, quantity);
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// Does nothing when no line exists for the product id (no line is
    /// created).
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
            self.mirror_save(product_id, quantity);
        }
    }

    /// Remove the line for the given product id, if present.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product.id != product_id);
        self.mirror_remove(product_id);
    }

    /// Empty the cart. Local-only: the server copy is left untouched.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity in the cart for the given product id, 0 when absent.
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_price(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.product.price * l.quantity as f64)
            .sum()
    }

    /// Sum of all line quantities (not the number of distinct lines).
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The cart lines, in first-add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pull the server-side cart for `email` and replace local state.
    ///
    /// Replacement is wholesale - any guest-cart contents are discarded,
    /// not merged. On transport or HTTP failure the prior local state is
    /// kept; a response that parses as JSON but is not a line array resets
    /// the cart to empty. The collection is always left usable.
    pub async fn restore(&mut self, email: &Email) {
        match self.api.fetch_cart(email).await {
            Ok(value) => {
                self.lines = serde_json::from_value(value).unwrap_or_default();
            }
            Err(e) => {
                tracing::warn!(email = %email, "failed to restore cart: {e}");
            }
        }
    }

    /// Fire-and-forget push of one line's stored quantity.
    fn mirror_save(&self, product_id: ProductId, quantity: i64) {
        let Some(email) = self.identity.current_email() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.save_cart_line(&email, product_id, quantity).await {
                tracing::warn!(email = %email, %product_id, "failed to sync cart line: {e}");
            }
        });
    }

    /// Fire-and-forget push of a line removal.
    fn mirror_remove(&self, product_id: ProductId) {
        let Some(email) = self.identity.current_email() else {
            return;
        };
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.delete_cart_line(&email, product_id).await {
                tracing::warn!(email = %email, %product_id, "failed to sync cart removal: {e}");
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    fn guest_cart() -> CartSession {
        // Guest sessions never touch the network, so any base URL works.
        let api = ApiClient::new(Url::parse("http://127.0.0.1:9").unwrap());
        CartSession::new(api, Identity::anonymous())
    }

    fn product(id: i64, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price,
            discount: 0,
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_add_aggregates_quantity() {
        let mut cart = guest_cart();
        cart.add(product(1, 100.0), 2);
        cart.add(product(1, 100.0), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity(ProductId::new(1)), 5);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = guest_cart();
        cart.add(product(3, 1.0), 1);
        cart.add(product(1, 1.0), 1);
        cart.add(product(3, 1.0), 1);
        cart.add(product(2, 1.0), 1);

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = guest_cart();
        cart.add(product(1, 10.0), 2);
        cart.set_quantity(ProductId::new(1), 7);
        assert_eq!(cart.quantity(ProductId::new(1)), 7);
    }

    #[test]
    fn test_set_quantity_missing_line_is_noop() {
        let mut cart = guest_cart();
        cart.set_quantity(ProductId::new(9), 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = guest_cart();
        cart.add(product(1, 10.0), 1);
        cart.remove(ProductId::new(9));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_quantity_of_absent_product_is_zero() {
        let cart = guest_cart();
        assert_eq!(cart.quantity(ProductId::new(1)), 0);
    }

    #[test]
    fn test_total_price_empty_cart() {
        let cart = guest_cart();
        assert!((cart.total_price() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = guest_cart();
        cart.add(product(1, 1.0), 2);
        cart.add(product(2, 1.0), 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = guest_cart();
        cart.add(product(1, 1.0), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_non_positive_quantities_accepted_verbatim() {
        // The cart does not validate quantities; callers own that.
        let mut cart = guest_cart();
        cart.add(product(1, 10.0), 0);
        assert_eq!(cart.quantity(ProductId::new(1)), 0);
        assert_eq!(cart.lines().len(), 1);

        cart.add(product(1, 10.0), -2);
        assert_eq!(cart.quantity(ProductId::new(1)), -2);
    }

    #[test]
    fn test_checkout_scenario() {
        let mut cart = guest_cart();
        cart.add(product(1, 12999.0), 2);
        cart.add(product(2, 500.0), 1);

        assert!((cart.total_price() - 26498.0).abs() < f64::EPSILON);
        assert_eq!(cart.item_count(), 3);

        cart.set_quantity(ProductId::new(1), 3);
        assert!((cart.total_price() - 39497.0).abs() < f64::EPSILON);

        cart.remove(ProductId::new(2));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product.id, ProductId::new(1));
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_line_deserializes_server_shape() {
        // The server embeds the full catalog product in each line; fields
        // the cart does not model land in `metadata`.
        let line: CartLine = serde_json::from_value(serde_json::json!({
            "product": {
                "id": 4,
                "name": "Rose Gold Bracelet",
                "price": 52360.0,
                "discount": 0,
                "sku": "BRACE-ROSE-001",
                "images": ["/images/jewelry/pink1.jpg"],
                "category_id": 4
            },
            "quantity": 2
        }))
        .unwrap();

        assert_eq!(line.product.id, ProductId::new(4));
        assert_eq!(line.quantity, 2);
        assert_eq!(
            line.product.metadata.get("sku").and_then(|v| v.as_str()),
            Some("BRACE-ROSE-001")
        );
    }
}
