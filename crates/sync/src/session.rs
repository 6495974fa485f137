//! Session-scoped container for the cart and favorites.
//!
//! One `SessionContext` exists per client session and owns both
//! collections plus the shared identity. UI code receives the context
//! explicitly rather than reaching for process-wide state.

use lustre_core::Email;

use crate::api::ApiClient;
use crate::cart::CartSession;
use crate::favorites::FavoritesSession;
use crate::identity::Identity;

/// Everything one storefront session needs: identity, cart, favorites.
pub struct SessionContext {
    identity: Identity,
    pub cart: CartSession,
    pub favorites: FavoritesSession,
}

impl SessionContext {
    /// Create a fresh guest session against the given API.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let identity = Identity::anonymous();
        Self {
            cart: CartSession::new(api.clone(), identity.clone()),
            favorites: FavoritesSession::new(api, identity.clone()),
            identity,
        }
    }

    /// The shared identity handle.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Transition from guest to authenticated.
    ///
    /// Records the identity, then pulls the account's cart and favorites,
    /// replacing any guest contents wholesale (no merge). Subsequent
    /// mutations mirror to the server under this email.
    pub async fn sign_in(&mut self, email: Email) {
        self.identity.sign_in(email.clone());
        tokio::join!(self.cart.restore(&email), self.favorites.restore(&email));
    }

    /// Transition back to guest.
    ///
    /// Only the identity is cleared; cart and favorites contents are
    /// retained and simply stop mirroring.
    pub fn sign_out(&mut self) {
        self.identity.sign_out();
    }
}
