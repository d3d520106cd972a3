//! HTTP handlers for order entry and reporting
//!
//! The presentation layer talks to the core only through these: submit a
//! form, list the latest orders, read the daily aggregates.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::core::error::ErrorResponse;
use crate::core::{
    DailySeries, DailyTotals, FormOptions, LATEST_ORDERS_CAP, Order, OrderEntry, RawOrder,
    daily_aggregate,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub entry: Arc<OrderEntry>,
}

impl AppState {
    pub fn new(entry: Arc<OrderEntry>) -> Self {
        Self { entry }
    }
}

/// Response for a saved order
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub order_id: i64,
    pub message: String,
}

/// Query parameters for the latest-orders list
#[derive(Debug, Default, Deserialize)]
pub struct LatestQuery {
    pub limit: Option<u32>,
}

/// Response for the latest-orders list
#[derive(Debug, Serialize)]
pub struct LatestOrdersResponse {
    pub orders: Vec<Order>,
    pub count: usize,
}

/// Response for the dashboard charts
#[derive(Debug, Serialize)]
pub struct DailyReportResponse {
    pub days: Vec<DailyTotals>,
    pub series: DailySeries,
}

/// POST /orders
pub async fn submit_order(
    State(state): State<AppState>,
    Json(raw): Json<RawOrder>,
) -> Result<(StatusCode, Json<SubmitResponse>), Response> {
    let order_id = state
        .entry
        .submit(raw)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            order_id,
            message: format!("Order saved (order_id = {})", order_id),
        }),
    ))
}

/// GET /orders?limit=N
///
/// `limit` defaults to, and is capped at, [`LATEST_ORDERS_CAP`].
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<LatestOrdersResponse>, Response> {
    let limit = match query.limit {
        None => LATEST_ORDERS_CAP,
        Some(n) => NonZeroU32::new(n)
            .ok_or_else(invalid_limit)?
            .min(LATEST_ORDERS_CAP),
    };

    let orders = state
        .entry
        .latest(limit)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(LatestOrdersResponse {
        count: orders.len(),
        orders,
    }))
}

/// GET /orders/daily
pub async fn daily_report(
    State(state): State<AppState>,
) -> Result<Json<DailyReportResponse>, Response> {
    let orders = state
        .entry
        .latest(LATEST_ORDERS_CAP)
        .await
        .map_err(IntoResponse::into_response)?;

    let days = daily_aggregate(&orders);
    let series = DailySeries::from(days.as_slice());

    Ok(Json(DailyReportResponse { days, series }))
}

/// GET /orders/options
pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::new())
}

fn invalid_limit() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            code: "INVALID_LIMIT".to_string(),
            message: "limit must be a positive integer".to_string(),
            details: None,
        }),
    )
        .into_response()
}
