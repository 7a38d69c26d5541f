//! HTTP interface.
//!
//! # Endpoints
//!
//! - `GET  /`: upload / preview page
//! - `POST /upload-preview`: multipart CSV, first rows as JSON
//! - `POST /upload`: multipart CSV, converted rows stored for download
//! - `GET  /convert`: converts the configured default CSV
//! - `GET  /download`: most recent conversion as `converted.json`
//! - `GET  /download/{id}`: a specific conversion
//! - `GET  /health`: status, version, uptime

pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::utils::error::Result;
use handlers::*;
use state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/upload-preview", post(preview_handler))
        .route("/upload", post(upload_handler))
        .route("/convert", get(convert_default_handler))
        .route("/download", get(download_latest_handler))
        .route("/download/{id}", get(download_handler))
        .route("/health", get(health_handler))
}

pub fn build_app(state: SharedState, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `app` on `listener` until Ctrl-C.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
