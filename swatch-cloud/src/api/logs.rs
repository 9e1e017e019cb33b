//! Scan log read API

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    DashboardStats, ItemAttribution, Pagination, ScanLog, ScanLogPage, attribute_items,
    normalize_order_id,
};
use shared::util::local_midnight_millis;

use super::proxy::SignedShop;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct LogSearchQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub query: Option<String>,
}

/// GET /api/logs
pub async fn search(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
    Query(q): Query<LogSearchQuery>,
) -> ServiceResult<Json<ScanLogPage>> {
    let page = q.page.unwrap_or(1).max(1);
    let limit = q.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let (logs, total) =
        db::scan_logs::search(&state.pool, &shop, q.query.as_deref(), page, limit).await?;
    Ok(Json(ScanLogPage {
        logs,
        pagination: Pagination::new(page, limit, total),
    }))
}

/// GET /api/logs/stats
pub async fn stats(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
) -> ServiceResult<Json<DashboardStats>> {
    let stats = db::scan_logs::dashboard_stats(&state.pool, &shop, local_midnight_millis()).await?;
    Ok(Json(stats))
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderLogsQuery {
    /// Include VOID and other non-fulfilled rows
    #[serde(default)]
    pub all: bool,
}

/// GET /api/orders/{order_id}/logs
pub async fn order_logs(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
    Path(order_id): Path<String>,
    Query(q): Query<OrderLogsQuery>,
) -> ServiceResult<Json<Vec<ScanLog>>> {
    let order_id = normalize_order_id(&order_id);
    let logs = if q.all {
        db::scan_logs::history(&state.pool, &shop, &order_id).await?
    } else {
        db::scan_logs::list_fulfilled(&state.pool, &shop, &order_id).await?
    };
    Ok(Json(logs))
}

/// GET /api/orders/{order_id}/logs/latest
pub async fn latest_log(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
    Path(order_id): Path<String>,
) -> ServiceResult<Json<ScanLog>> {
    let order_id = normalize_order_id(&order_id);
    let log = db::scan_logs::latest_fulfilled(&state.pool, &shop, &order_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ScanLogNotFound,
                format!("No fulfilled scan log for {order_id}"),
            )
        })?;
    Ok(Json(log))
}

/// GET /api/orders/{order_id}/attribution
pub async fn attribution(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
    Path(order_id): Path<String>,
) -> ServiceResult<Json<BTreeMap<String, ItemAttribution>>> {
    let order_id = normalize_order_id(&order_id);
    let logs = db::scan_logs::list_fulfilled(&state.pool, &shop, &order_id).await?;
    Ok(Json(attribute_items(&logs)))
}
