use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Uri},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::app_state::AppState;
use super::error::{ApiError, QrError};
use crate::application::confirmation_qr::generate_confirmation_qr;
use crate::domain::order::Order;

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state.orders.get_order(&order_id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct GenerateQrQuery {
    pub order_id: Option<String>,
}

pub async fn generate_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<GenerateQrQuery>,
) -> Result<impl IntoResponse, QrError> {
    let host = request_host(&headers, &uri);

    let confirmation = generate_confirmation_qr(
        state.orders.as_ref(),
        state.qr_renderer.as_ref(),
        query.order_id.as_deref(),
        host.as_deref(),
        state.scheme_policy,
    )
    .await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], confirmation.png))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "order-confirmation",
    }))
}

/// Host the client addressed, from the `Host` header or an absolute request URI.
fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| uri.authority().map(|authority| authority.to_string()))
}
