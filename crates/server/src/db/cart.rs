//! Cart repository.

use lustre_core::{Email, ProductId};

use crate::models::CartEntry;
use crate::store::{Store, StoreError};

fn cart_key(email: &Email) -> String {
    format!("cart:{}", email.as_str())
}

/// Repository for per-user cart lines, keyed by email.
pub struct CartRepository<'a> {
    store: &'a Store,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All cart lines for the user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn entries(&self, email: &Email) -> Result<Vec<CartEntry>, StoreError> {
        Ok(self.store.get(&cart_key(email))?.unwrap_or_default())
    }

    /// Insert a line, or overwrite the stored quantity of an existing one.
    ///
    /// The received quantity is stored verbatim in both cases; this single
    /// write path serves the client's incremental adds and its absolute
    /// updates alike.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be accessed.
    pub fn upsert(
        &self,
        email: &Email,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let key = cart_key(email);
        let mut entries: Vec<CartEntry> = self.store.get(&key)?.unwrap_or_default();
        match entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => entry.quantity = quantity,
            None => entries.push(CartEntry {
                product_id,
                quantity,
            }),
        }
        self.store.set(&key, &entries)
    }

    /// Remove the line for the product, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be accessed.
    pub fn remove(&self, email: &Email, product_id: ProductId) -> Result<(), StoreError> {
        let key = cart_key(email);
        let mut entries: Vec<CartEntry> = self.store.get(&key)?.unwrap_or_default();
        entries.retain(|e| e.product_id != product_id);
        self.store.set(&key, &entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::parse("anna@example.com").unwrap()
    }

    #[test]
    fn test_upsert_inserts_then_overwrites() {
        let store = Store::memory();
        let cart = CartRepository::new(&store);
        let anna = email();

        cart.upsert(&anna, ProductId::new(1), 2).unwrap();
        cart.upsert(&anna, ProductId::new(1), 5).unwrap();

        let entries = cart.entries(&anna).unwrap();
        assert_eq!(entries.len(), 1);
        // Absolute overwrite, not aggregation.
        assert_eq!(entries[0].quantity, 5);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let store = Store::memory();
        let cart = CartRepository::new(&store);
        let anna = email();

        cart.upsert(&anna, ProductId::new(3), 1).unwrap();
        cart.upsert(&anna, ProductId::new(1), 1).unwrap();

        let ids: Vec<i64> = cart
            .entries(&anna)
            .unwrap()
            .iter()
            .map(|e| e.product_id.as_i64())
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_remove_and_remove_missing() {
        let store = Store::memory();
        let cart = CartRepository::new(&store);
        let anna = email();

        cart.upsert(&anna, ProductId::new(1), 2).unwrap();
        cart.remove(&anna, ProductId::new(9)).unwrap();
        assert_eq!(cart.entries(&anna).unwrap().len(), 1);

        cart.remove(&anna, ProductId::new(1)).unwrap();
        assert!(cart.entries(&anna).unwrap().is_empty());
    }

    #[test]
    fn test_carts_isolated_per_user() {
        let store = Store::memory();
        let cart = CartRepository::new(&store);
        cart.upsert(&email(), ProductId::new(1), 1).unwrap();

        let other = Email::parse("boris@example.com").unwrap();
        assert!(cart.entries(&other).unwrap().is_empty());
    }
}
