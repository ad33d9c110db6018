//! HTTP route handlers.
//!
//! - `health`: liveness, readiness, version and metrics
//! - `libraries`: the libraries page, its order and its actions
//! - `tasks`: live refresh-task progress over SSE

pub mod health;
pub mod libraries;
pub mod tasks;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// All API routes with state applied. Static UI and layers are added by the binary.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/api/libraries", post(libraries::create_library))
        .route("/api/libraries/page", get(libraries::get_page))
        .route("/api/libraries/order", get(libraries::get_order).put(libraries::put_order))
        .route("/api/libraries/order/move", post(libraries::move_library))
        .route("/api/libraries/scan", post(libraries::scan_all))
        .route("/api/libraries/collection-types", get(libraries::collection_types))
        .route("/api/tasks/refresh/events", get(tasks::refresh_task_events))
        .with_state(state)
}
