//! Lustre Sync - client-side cart and favorites state.
//!
//! This crate holds the authoritative in-memory shopping state for one
//! storefront session and mirrors it, best-effort, to the Lustre server.
//!
//! # Model
//!
//! Mutations are local-first: every operation updates the in-memory
//! collection synchronously, then (only when an [`Identity`] is signed in)
//! fires a non-blocking push to the server. Push failures are logged and
//! swallowed - the caller never sees them, and the local mutation is never
//! rolled back. There is no retry queue, so a lost push leaves the remote
//! copy stale until the next [`CartSession::restore`] /
//! [`FavoritesSession::restore`] pulls a fresh snapshot.
//!
//! Restore always replaces local state wholesale; guest-cart contents are
//! not merged into the account cart on sign-in.
//!
//! # Concurrency
//!
//! Sessions are single-owner and not `Sync`; mutations require `&mut self`
//! and are atomic with respect to the collection. In-flight pushes are not
//! cancelled or ordered, so rapid repeated mutations for the same product
//! can land on the server out of order (last write wins).
//!
//! Mirroring uses `tokio::spawn`, so mutating an authenticated session
//! must happen inside a Tokio runtime.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod favorites;
pub mod identity;
pub mod session;

pub use api::{ApiClient, SyncError};
pub use cart::{CartLine, CartSession, Product};
pub use favorites::FavoritesSession;
pub use identity::Identity;
pub use session::SessionContext;
