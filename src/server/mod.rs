//! Axum server setup
//!
//! Routes:
//! - `GET /health`: liveness, no authentication
//! - `GET /latest.json`: rewritten update manifest
//! - `GET /download/{owner}/{repo}/releases/download/{tag}/{filename}`: asset bytes
//!
//! Everything except `/health` sits behind the basic-auth gate, including
//! unknown paths.

pub mod auth;
pub mod handlers;

use crate::config::Config;
use crate::core::ProxyResult;
use crate::di::ServiceContainer;
use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(container: ServiceContainer) -> Router {
    let protected = Router::new()
        .route("/latest.json", get(handlers::latest_manifest))
        .route("/download", get(handlers::download_asset))
        .route("/download/", get(handlers::download_asset))
        .route("/download/*path", get(handlers::download_asset))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            container.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: Config) -> ProxyResult<()> {
    let addr = config.bind_addr();
    tracing::debug!(?config, "Starting with configuration");

    let container = ServiceContainer::new(config)?;
    let app = router(container);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Release proxy listening on http://{}", addr);
    tracing::info!("   Manifest: http://{}/latest.json", addr);
    tracing::info!("   Health:   http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Release proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
