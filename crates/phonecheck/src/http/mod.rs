//! HTTP surface: two HTML pages and a small JSON API.

mod handlers;

use axum::routing::{get, post};
use axum::Router;

use crate::service::CheckService;

pub use handlers::{CheckRequest, ErrorResponse, HealthResponse, LogEntryResponse};

/// Shared request state. Cloned per request; everything inside is `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub service: CheckService,
}

impl AppState {
    pub fn new(service: CheckService) -> Self {
        Self { service }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/log", get(handlers::log_page))
        .route("/api/check", post(handlers::check))
        .route("/api/logs/all", get(handlers::all_logs))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
