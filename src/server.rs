// Server setup and configuration

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::endpoints::{AppState, auth_handler, jwks_handler};
use crate::types::KeyStore;

pub const JWKS_PATH: &str = "/.well-known/jwks.json";
pub const AUTH_PATH: &str = "/auth";

/// Create the application router with all endpoints.
///
/// Each path is bound to a single method, so any other method gets a 405 with
/// an empty body from the router.
pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        .route(JWKS_PATH, get(jwks_handler))
        .route(AUTH_PATH, post(auth_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Generate the keystore, bind the listener and serve until shutdown.
pub async fn start_server(config: &ServerConfig) -> anyhow::Result<()> {
    // No traffic is served without keys
    let keys = KeyStore::create()?;
    let app = create_app(Arc::new(keys));

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("JWKS issuer listening on http://{}", listener.local_addr()?);
    tracing::info!("  GET  {JWKS_PATH} - JWKS endpoint");
    tracing::info!("  POST {AUTH_PATH}                   - Issue token with active key");
    tracing::info!("  POST {AUTH_PATH}?expired           - Issue expired token with expired key");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
