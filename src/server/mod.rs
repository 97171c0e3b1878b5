//! HTTP front end: upload form, rendered editor page and CSV export.

pub mod error;
pub mod page;
pub mod routes;
pub mod uploads;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Settings;
use crate::types::EditorError;
use crate::visualization::RenderStyle;

pub use error::PageError;
pub use uploads::UploadStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub uploads: Arc<UploadStore>,
    pub style: Arc<RenderStyle>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self, EditorError> {
        Ok(Self {
            uploads: Arc::new(UploadStore::new()?),
            style: Arc::new(settings.render.clone()),
        })
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::upload))
        .route("/api/export_csv", post(routes::export_csv))
        .route("/static/interactive_map.js", get(routes::editor_script))
        .route("/static/style.css", get(routes::stylesheet))
        .route("/healthz", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Bind and serve until Ctrl-C. The upload directory is removed on return.
pub async fn serve(settings: Settings) -> Result<(), EditorError> {
    let state = AppState::new(&settings)?;
    let app = router(state, settings.server.max_upload_bytes);

    let listener = TcpListener::bind(settings.server.address()).await?;
    let addr = listener.local_addr()?;
    info!("Navigate to http://{addr} in your web browser.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, upload directory removed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
