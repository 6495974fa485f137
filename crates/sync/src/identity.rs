//! The signed-in user's identity, shared across sessions.

use std::sync::{Arc, RwLock};

use lustre_core::Email;

/// A cheaply cloneable handle to the current user identity.
///
/// The identity gates remote mirroring: while anonymous, cart and
/// favorites mutations stay local-only; once signed in, every mutation is
/// pushed to the server keyed by this email.
///
/// Signing out does not touch cart or favorites contents - the collections
/// keep whatever state they had, they just stop mirroring.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    current: Arc<RwLock<Option<Email>>>,
}

impl Identity {
    /// Create an anonymous (guest) identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create an identity that is already signed in.
    #[must_use]
    pub fn authenticated(email: Email) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(email))),
        }
    }

    /// The current user's email, or `None` while anonymous.
    #[must_use]
    pub fn current_email(&self) -> Option<Email> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_email().is_some()
    }

    /// Record a sign-in.
    pub fn sign_in(&self, email: Email) {
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(email);
        }
    }

    /// Record a sign-out.
    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
    }
}
