//! Blob-backed progress sync API.
//!
//! A single resource, `/api/sync`, reads, replaces or deletes the progress
//! blob. CORS is open to any origin so a browser client on another host can
//! call it.

pub mod error;
pub mod handlers;

pub use error::{AppError, AppResult};

use crate::storage::BlobStore;
use axum::{Router, routing::get};
use http::{Method, header};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }
}

pub fn build_router(state: AppState) -> Router {
    let sync_routes = get(handlers::load_progress)
        .post(handlers::save_progress)
        .delete(handlers::clear_progress)
        .options(handlers::preflight)
        .head(handlers::method_not_allowed)
        .fallback(handlers::method_not_allowed);

    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route("/api/sync", sync_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
