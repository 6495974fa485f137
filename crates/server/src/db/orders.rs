//! Order repository.

use chrono::Utc;
use lustre_core::{Email, OrderId, ProductId, UserId};

use crate::models::Order;
use crate::store::{Store, StoreError};

/// Status every new order starts in.
const INITIAL_STATUS: &str = "new";

fn orders_key(email: &Email) -> String {
    format!("orders:{}", email.as_str())
}

/// Repository for per-user order history, keyed by email.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All orders for the user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn list(&self, email: &Email) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self.store.get(&orders_key(email))?.unwrap_or_default();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Append a new order in status `new`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be accessed.
    pub fn create(
        &self,
        user_id: UserId,
        email: &Email,
        product_ids: Vec<ProductId>,
    ) -> Result<Order, StoreError> {
        let order = Order {
            id: OrderId::new(self.store.next_id("order")?),
            user_id,
            product_ids,
            status: INITIAL_STATUS.to_owned(),
            created_at: Utc::now(),
            products: Vec::new(),
        };
        let key = orders_key(email);
        let mut orders: Vec<Order> = self.store.get(&key)?.unwrap_or_default();
        orders.push(order.clone());
        self.store.set(&key, &orders)?;
        Ok(order)
    }
}
