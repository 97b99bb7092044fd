//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/` - The single-page front-end
//! - `/api/session` - Current render model
//! - `/api/files` - Document upload (multipart)
//! - `/api/query` - Ask a question about the uploaded documents
//! - `/api/health` - Health checks

pub mod chat;
pub mod files;
pub mod health;
pub mod ui;

use axum::Router;
use crate::middleware::cors_layer;
use crate::models::AppState;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(chat::router(state.clone()))
        .merge(files::router(state.clone()))
        .merge(health::router(state))
        .merge(ui::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
