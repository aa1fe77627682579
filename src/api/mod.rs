//! HTTP surface: router, middleware and handlers.

pub mod cors;
pub mod handlers;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::environment::AppConfig;
use crate::service::Services;

/// Largest request body accepted.
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Builds the application router around the given services.
pub fn router(services: Services) -> Router {
    Router::new()
        .route("/api/generate", post(handlers::generate_note))
        .route("/api/reviews/generate", post(handlers::generate_reviews))
        .route("/api/xhs/publish", post(handlers::publish_note))
        .with_state(services)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(middleware::from_fn(cors::cors))
}

/// Binds the listener and serves until the process is stopped.
pub async fn api_loop(config: AppConfig) -> Result<()> {
    for var in config.missing_credentials() {
        warn!("Missing {} environment variable; set it in .env", var);
    }

    let services = Services::from_config(&config)?;
    let app = router(services);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down.");
}
