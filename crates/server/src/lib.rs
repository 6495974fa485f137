//! Lustre storefront API server library.
//!
//! Exposes the router, state and repositories so integration tests can
//! spin up a real server against an in-memory store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
