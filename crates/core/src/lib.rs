//! Lustre Core - Shared types library.
//!
//! This crate provides common types used across all Lustre components:
//! - `server` - Storefront HTTP API
//! - `sync` - Client-side cart/favorites synchronization library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
