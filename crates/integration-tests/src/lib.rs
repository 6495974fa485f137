//! Integration tests for Lustre.
//!
//! Each test spawns a real `lustre-server` on an ephemeral port, backed
//! by a seeded in-memory store. No external services are needed; run
//! with `cargo test -p lustre-integration-tests`.
//!
//! # Test Categories
//!
//! - `storefront_api` - Catalog, reviews, users and orders over HTTP
//! - `cart_api` - Server-side cart contract
//! - `favorites_api` - Server-side favorites contract
//! - `sync_flow` - Client synchronizers against a live server

#![allow(clippy::expect_used)]

use std::future::Future;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use lustre_server::config::ServerConfig;
use lustre_server::routes;
use lustre_server::seed;
use lustre_server::state::AppState;
use lustre_server::store::Store;
use url::Url;

/// A running server instance backed by an in-memory store.
pub struct TestServer {
    pub client: reqwest::Client,
    base: String,
}

impl TestServer {
    /// Spawn a server with the standard seeded catalog.
    ///
    /// # Panics
    ///
    /// Panics when the server cannot be started.
    pub async fn spawn() -> Self {
        let store = Store::memory();
        seed::seed(&store).expect("Failed to seed catalog");
        Self::spawn_with_store(store).await
    }

    /// Spawn a server over the given store.
    ///
    /// # Panics
    ///
    /// Panics when the server cannot be started.
    pub async fn spawn_with_store(store: Store) -> Self {
        let config = ServerConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            data_path: PathBuf::from("unused-in-tests"),
        };
        let state = AppState::new(config, store);
        let app = routes::routes().with_state(state);

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            client: reqwest::Client::new(),
            base: format!("http://{addr}"),
        }
    }

    /// The server base URL, e.g. `http://127.0.0.1:54321`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// The server base URL as a parsed [`Url`].
    ///
    /// # Panics
    ///
    /// Panics when the base URL does not parse; it always does.
    #[must_use]
    pub fn base_url_parsed(&self) -> Url {
        Url::parse(&self.base).expect("test server URL is valid")
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Register a user so cart and favorites requests are accepted.
    ///
    /// # Panics
    ///
    /// Panics when registration does not return 201.
    pub async fn register_user(&self, email: &str) {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .expect("Failed to register user");
        assert_eq!(response.status(), 201);
    }
}

/// Poll a condition until it holds or a short deadline passes.
///
/// Fire-and-forget pushes land at their own pace; tests assert on the
/// eventual server state through this helper.
pub async fn wait_for<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..80 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}
