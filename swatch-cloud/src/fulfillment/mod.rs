//! Scan fulfillment chain
//!
//! One sequential chain per scan request:
//!
//! 1. [`locator`]: fetch fulfillment orders, pick the first fulfillable one
//! 2. [`matcher`]: map verified items to line item quantities, classify
//! 3. [`submitter`]: create the fulfillment upstream
//! 4. [`audit`]: append the scan log
//!
//! No local locking: upstream remaining-quantity validation is the only guard
//! against two scanners racing on the same order.

pub mod audit;
pub mod locator;
pub mod matcher;
pub mod submitter;

use shared::error::ErrorCode;
use shared::models::{
    FulfillmentKind, FulfillmentOrderStatus, ScanFulfillmentRequest, ScanFulfillmentResponse,
    normalize_order_id,
};
use shared::util::now_millis;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::shopify::{AdminApi, AdminApiError};
use matcher::MatchedItems;

/// Fulfillment order seen while looking for a fulfillable one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFulfillmentOrder {
    pub id: String,
    pub status: FulfillmentOrderStatus,
}

fn describe_found(found: &[FoundFulfillmentOrder]) -> String {
    if found.is_empty() {
        return "none".to_string();
    }
    found
        .iter()
        .map(|fo| format!("{} ({})", fo.status, fo.id))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum FulfillmentError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Shop {0} is not served by this deployment")]
    ShopNotServed(String),

    #[error("GraphQL Error: {}", .0.join(", "))]
    RemoteQueryFailed(Vec<String>),

    #[error("No fulfillable orders found. Statuses: {}", describe_found(.found))]
    NoFulfillableOrder { found: Vec<FoundFulfillmentOrder> },

    #[error("No items to fulfill - verified items don't match fulfillment order")]
    NoMatchingItems,

    #[error("Unable to create fulfillment: {0}")]
    FulfillmentRejected(String),

    #[error("Fulfillment was created but the scan log could not be written: {0}")]
    AuditWriteFailed(String),
}

impl FulfillmentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidRequest(_) => ErrorCode::InvalidRequest,
            Self::ShopNotServed(_) => ErrorCode::ShopNotServed,
            Self::RemoteQueryFailed(_) => ErrorCode::UpstreamQueryFailed,
            Self::NoFulfillableOrder { .. } => ErrorCode::NoFulfillableOrder,
            Self::NoMatchingItems => ErrorCode::NoMatchingItems,
            Self::FulfillmentRejected(_) => ErrorCode::FulfillmentRejected,
            Self::AuditWriteFailed(_) => ErrorCode::AuditWriteFailed,
        }
    }
}

impl From<AdminApiError> for FulfillmentError {
    fn from(e: AdminApiError) -> Self {
        match e {
            AdminApiError::UserErrors(_) => Self::FulfillmentRejected(e.to_string()),
            AdminApiError::Graphql(messages) => Self::RemoteQueryFailed(messages),
            AdminApiError::Transport(_) | AdminApiError::Decode(_) => {
                Self::RemoteQueryFailed(vec![e.to_string()])
            }
        }
    }
}

/// Result of a completed scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub order_id: String,
    pub fulfillment_order_id: String,
    pub fulfillment_id: Option<String>,
    pub log_id: i64,
    pub matched: MatchedItems,
}

impl ScanOutcome {
    pub fn kind(&self) -> FulfillmentKind {
        self.matched.classification.kind
    }

    /// Message shown to the scanner operator
    pub fn message(&self) -> String {
        let c = &self.matched.classification;
        match c.kind {
            FulfillmentKind::Partial => format!(
                "{} items shipped. {} items remaining.",
                c.fulfilled_now, c.total_remaining_after
            ),
            FulfillmentKind::Full => format!(
                "Order fulfilled successfully! All {} items shipped.",
                c.fulfilled_now
            ),
        }
    }
}

impl From<&ScanOutcome> for ScanFulfillmentResponse {
    fn from(outcome: &ScanOutcome) -> Self {
        ScanFulfillmentResponse::fulfilled(outcome.kind(), outcome.message())
    }
}

impl From<&FulfillmentError> for ScanFulfillmentResponse {
    fn from(err: &FulfillmentError) -> Self {
        ScanFulfillmentResponse::failed(err.to_string())
    }
}

/// Run the full chain for one scan
///
/// `shop` must be the store `admin` is authorized against. The audit row is
/// written before this returns `Ok`.
pub async fn fulfill_scan(
    admin: &dyn AdminApi,
    pool: &SqlitePool,
    shop: &str,
    request: &ScanFulfillmentRequest,
) -> Result<ScanOutcome, FulfillmentError> {
    if !admin.shop_domain().eq_ignore_ascii_case(shop) {
        return Err(FulfillmentError::ShopNotServed(shop.to_string()));
    }

    let order_id = normalize_order_id(&request.order_id);
    if order_id.is_empty() {
        return Err(FulfillmentError::InvalidRequest("orderId is required".into()));
    }

    let fulfillment_order = locator::locate(admin, &order_id).await?;
    let matched = matcher::match_items(&fulfillment_order, &request.verified_items)?;
    let created = submitter::submit(admin, &fulfillment_order.id, &matched).await?;

    let entry = audit::build_entry(shop, &order_id, &request.staff_data, &matched, now_millis());
    let log_id = audit::record(pool, &entry).await?;

    Ok(ScanOutcome {
        order_id,
        fulfillment_order_id: fulfillment_order.id,
        fulfillment_id: created.id,
        log_id,
        matched,
    })
}
