use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::app_state::AppState;
use super::handlers;

/// Every route is served both bare and under `/api`.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/orders", get(handlers::list_orders))
        .route("/api/orders", get(handlers::list_orders))
        .route("/order/:order_id", get(handlers::get_order))
        .route("/api/order/:order_id", get(handlers::get_order))
        .route("/generate-qr", get(handlers::generate_qr))
        .route("/api/generate-qr", get(handlers::generate_qr))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
