//! Scanner fulfillment endpoint
//!
//! POST /api/proxy/fulfill. Every outcome past proxy authentication is an
//! HTTP 200 with `{success, ...}`; the scanner UI reads `error` verbatim.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::models::{ScanFulfillmentRequest, ScanFulfillmentResponse};

use super::proxy::SignedShop;
use crate::fulfillment;
use crate::state::AppState;

pub async fn fulfill(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
    payload: Result<Json<ScanFulfillmentRequest>, JsonRejection>,
) -> Json<ScanFulfillmentResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::warn!(shop = %shop, error = %e.body_text(), "Unreadable scan request");
            return Json(ScanFulfillmentResponse::failed(format!(
                "Invalid request: {}",
                e.body_text()
            )));
        }
    };

    match fulfillment::fulfill_scan(state.admin.as_ref(), &state.pool, &shop, &request).await {
        Ok(outcome) => {
            tracing::info!(
                shop = %shop,
                order_id = %outcome.order_id,
                fulfillment_order_id = %outcome.fulfillment_order_id,
                log_id = outcome.log_id,
                scanned_by = %request.staff_data.name,
                partial = outcome.kind().is_partial(),
                "Scan fulfilled"
            );
            Json(ScanFulfillmentResponse::from(&outcome))
        }
        Err(e) => {
            tracing::warn!(
                shop = %shop,
                order_id = %request.order_id,
                code = %e.code(),
                error = %e,
                "Scan fulfillment failed"
            );
            Json(ScanFulfillmentResponse::from(&e))
        }
    }
}
