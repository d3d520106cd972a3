//! Router builder for the order desk REST surface

use super::handlers::{AppState, daily_report, form_options, list_orders, submit_order};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Build every route
///
/// - GET /health, /healthz - Liveness
/// - GET /orders/options - Closed sets for the entry form
/// - POST /orders - Submit a form
/// - GET /orders?limit=N - Latest orders, newest first
/// - GET /orders/daily - Daily order count and revenue
pub fn build_router(state: AppState) -> Router {
    let order_routes = Router::new()
        .route("/orders", get(list_orders).post(submit_order))
        .route("/orders/options", get(form_options))
        .route("/orders/daily", get(daily_report))
        .with_state(state);

    health_routes()
        .merge(order_routes)
        .layer(TraceLayer::new_for_http())
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "order-desk"
    }))
}
