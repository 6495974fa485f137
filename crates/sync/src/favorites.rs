//! The favorites session.
//!
//! Set-valued sibling of [`crate::cart::CartSession`]. The remote protocol
//! is replace-whole-list, so every mutation pushes the full current set
//! rather than a delta.

use lustre_core::{Email, ProductId};

use crate::api::ApiClient;
use crate::identity::Identity;

/// In-memory favorites list with best-effort server mirroring.
///
/// Membership is what matters; insertion order is preserved anyway so the
/// UI stays stable across toggles.
pub struct FavoritesSession {
    ids: Vec<ProductId>,
    api: ApiClient,
    identity: Identity,
}

impl FavoritesSession {
    /// Create an empty favorites list for the given identity.
    #[must_use]
    pub fn new(api: ApiClient, identity: Identity) -> Self {
        Self {
            ids: Vec::new(),
            api,
            identity,
        }
    }

    /// Add the product id when absent, remove it when present.
    pub fn toggle(&mut self, product_id: ProductId) {
        if let Some(pos) = self.ids.iter().position(|id| *id == product_id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(product_id);
        }
        self.mirror_save();
    }

    /// Whether the product id is currently a favorite.
    #[must_use]
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.ids.contains(&product_id)
    }

    /// Remove the product id, if present.
    pub fn remove(&mut self, product_id: ProductId) {
        self.ids.retain(|id| *id != product_id);
        self.mirror_save();
    }

    /// The favorite product ids, in first-toggle order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Pull the server-side list for `email` and replace local state.
    ///
    /// Same failure policy as the cart: transport or HTTP failure keeps
    /// the prior list, a JSON payload that is not an id array resets to
    /// empty. The list is always left usable.
    pub async fn restore(&mut self, email: &Email) {
        match self.api.fetch_favorites(email).await {
            Ok(value) => {
                self.ids = serde_json::from_value(value).unwrap_or_default();
            }
            Err(e) => {
                tracing::warn!(email = %email, "failed to restore favorites: {e}");
            }
        }
    }

    /// Fire-and-forget push of the entire current set.
    fn mirror_save(&self) {
        let Some(email) = self.identity.current_email() else {
            return;
        };
        let api = self.api.clone();
        let snapshot = self.ids.clone();
        tokio::spawn(async move {
            if let Err(e) = api.save_favorites(&email, &snapshot).await {
                tracing::warn!(email = %email, "failed to sync favorites: {e}");
            }
        });
    }
}
