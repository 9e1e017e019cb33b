//! Scanner PIN login
//!
//! POST /api/proxy/auth. The admin identity from settings is checked first,
//! then the staff table.

use axum::Json;
use axum::extract::State;
use shared::models::{StaffAuthRequest, StaffAuthResponse};

use super::proxy::SignedShop;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

pub async fn staff_auth(
    State(state): State<AppState>,
    SignedShop(shop): SignedShop,
    Json(req): Json<StaffAuthRequest>,
) -> ServiceResult<Json<StaffAuthResponse>> {
    let identifier = req.identifier.trim();
    if identifier.is_empty() || req.pin.is_empty() {
        return Ok(Json(StaffAuthResponse {
            valid: false,
            staff: None,
        }));
    }

    let settings = db::settings::get_or_create(&state.pool, &shop).await?;
    if let Some(admin) = settings.authenticate_admin(identifier, &req.pin) {
        tracing::info!(shop = %shop, "Admin signed in to scanner");
        return Ok(Json(StaffAuthResponse {
            valid: true,
            staff: Some(admin),
        }));
    }

    match db::settings::find_staff(&state.pool, &shop, identifier, &req.pin).await? {
        Some(member) => {
            tracing::info!(shop = %shop, staff_id = member.id, "Staff signed in to scanner");
            Ok(Json(StaffAuthResponse {
                valid: true,
                staff: Some(member.identity()),
            }))
        }
        None => {
            tracing::warn!(shop = %shop, "Scanner login rejected");
            Ok(Json(StaffAuthResponse {
                valid: false,
                staff: None,
            }))
        }
    }
}
