//! Favorites repository.

use lustre_core::{Email, ProductId};

use crate::store::{Store, StoreError};

fn favorites_key(email: &Email) -> String {
    format!("favorites:{}", email.as_str())
}

/// Repository for per-user favorite product ids, keyed by email.
///
/// The protocol is replace-whole-list: [`FavoritesRepository::set`]
/// overwrites whatever was stored before.
pub struct FavoritesRepository<'a> {
    store: &'a Store,
}

impl<'a> FavoritesRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The stored list, or `None` when the user has never saved one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn get(&self, email: &Email) -> Result<Option<Vec<ProductId>>, StoreError> {
        self.store.get(&favorites_key(email))
    }

    /// Replace the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    pub fn set(&self, email: &Email, product_ids: &[ProductId]) -> Result<(), StoreError> {
        self.store.set(&favorites_key(email), &product_ids)
    }
}
