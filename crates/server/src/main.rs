//! Lustre storefront API - jewelry shop backend.
//!
//! Serves the catalog, reviews, banners, news, users, orders, and the
//! server-side cart and favorites storage the client synchronizers push
//! to.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - JSON-file key-value store, seeded with the catalog on first run
//! - CORS open to any origin; the browser clients live elsewhere

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lustre_server::config::ServerConfig;
use lustre_server::state::AppState;
use lustre_server::store::Store;
use lustre_server::{routes, seed};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lustre_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the store, seeding the catalog on first run
    let fresh = !config.data_path.exists();
    let store = Store::open(&config.data_path).expect("Failed to open data store");
    if fresh {
        seed::seed(&store).expect("Failed to seed catalog");
        tracing::info!(path = %config.data_path.display(), "seeded fresh catalog");
    }

    let state = AppState::new(config.clone(), store);

    // Build router
    let app = routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("lustre-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
