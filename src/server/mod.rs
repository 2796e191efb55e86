//! HTTP surface: the QR image endpoint and the mini-app manifest.

mod error;
pub mod manifest;
pub mod qr;

use std::sync::Arc;

use axum::{routing::get, Router};
use thiserror::Error;
use tokio::signal;

pub use error::{ApiError, ErrorResponse};

use crate::config::ServeConfig;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Immutable per-process state shared by the handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub manifest: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/qr", get(qr::qr_image))
        .route("/.well-known/farcaster.json", get(manifest::manifest))
        .with_state(state)
}

/// Serves until Ctrl-C.
pub async fn run(config: ServeConfig) -> Result<(), ServeError> {
    let state = Arc::new(AppState {
        manifest: manifest::load(&config).await?,
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    log::info!("listening on {} (app url {})", listener.local_addr()?, config.app_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                log::error!("failed to install Ctrl-C handler: {}", e);
            }
            log::info!("shutting down gracefully");
        })
        .await?;

    Ok(())
}
