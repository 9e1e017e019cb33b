//! App proxy authentication
//!
//! Scanner and dashboard calls arrive through the platform's app proxy,
//! which appends `shop`, `timestamp`, `path_prefix` and a `signature` to the
//! query string.

use axum::extract::{FromRequestParts, Query};
use http::request::Parts;
use shared::error::{AppError, ErrorCode};

use crate::shopify::signature;
use crate::state::AppState;

/// Shop domain from a correctly signed app proxy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedShop(pub String);

impl FromRequestParts<AppState> for SignedShop {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::invalid_request(e.body_text()))?;

        if !params.iter().any(|(k, _)| k == "signature") {
            tracing::warn!(uri = %parts.uri.path(), "App proxy request without signature");
            return Err(AppError::new(ErrorCode::SignatureMissing));
        }

        if let Err(e) = signature::verify_proxy_signature(&params, &state.api_secret) {
            tracing::warn!(error = e, uri = %parts.uri.path(), "App proxy signature rejected");
            return Err(AppError::signature_invalid(e));
        }

        params
            .into_iter()
            .find(|(k, _)| k == "shop")
            .map(|(_, v)| v)
            .filter(|shop| !shop.is_empty())
            .map(SignedShop)
            .ok_or_else(|| AppError::validation("shop parameter is required"))
    }
}
