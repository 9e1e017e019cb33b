//! HTTP routes

pub mod auth;
pub mod fulfill;
pub mod health;
pub mod logs;
pub mod middleware;
pub mod proxy;
pub mod webhooks;

use axum::routing::{get, post};
use axum::{Router, middleware as axum_middleware};
use http::HeaderName;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use middleware::{REQUEST_ID_HEADER, UuidRequestId};

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // App proxy (signed query string)
    let proxy = Router::new()
        .route("/api/proxy/fulfill", post(fulfill::fulfill))
        .route("/api/proxy/auth", post(auth::staff_auth));

    // Scan log reads (signed query string)
    let logs = Router::new()
        .route("/api/logs", get(logs::search))
        .route("/api/logs/stats", get(logs::stats))
        .route("/api/orders/{order_id}/logs", get(logs::order_logs))
        .route("/api/orders/{order_id}/logs/latest", get(logs::latest_log))
        .route("/api/orders/{order_id}/attribution", get(logs::attribution));

    // Order webhook (HMAC-verified, raw body)
    let webhook = Router::new().route("/webhooks/orders/updated", post(webhooks::orders_updated));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(proxy)
        .merge(logs)
        .merge(webhook)
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // outermost: set the id before propagating it to the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            UuidRequestId,
        ))
        .with_state(state)
}
