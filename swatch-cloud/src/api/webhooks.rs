//! Order update webhook
//!
//! POST /webhooks/orders/updated (raw body for HMAC verification). Only an
//! authenticity failure changes the status code; everything after that is
//! logged and acknowledged so the platform does not retry.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::reconcile::{self, HMAC_HEADER, SHOP_HEADER, TOPIC_HEADER};
use crate::state::AppState;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub async fn orders_updated(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Err(e) = reconcile::authenticate(&body, header(&headers, HMAC_HEADER), &state.api_secret)
    {
        tracing::warn!(error = %e, "Order webhook rejected");
        return StatusCode::UNAUTHORIZED;
    }

    let shop = header(&headers, SHOP_HEADER).unwrap_or_default();
    let topic = header(&headers, TOPIC_HEADER).unwrap_or_default();

    if let Err(e) = reconcile::process(&state.pool, shop, topic, &body).await {
        tracing::error!(shop, topic, error = %e, "Order webhook processing failed");
    }
    StatusCode::OK
}
