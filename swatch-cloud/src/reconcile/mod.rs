//! Webhook-driven scan log reconciliation
//!
//! Upstream is the source of truth for fulfillment state. When an order
//! update arrives, every scan log of that order is moved to the status the
//! upstream order-level fulfillment status implies:
//!
//! | upstream                        | current                         | next                |
//! |---------------------------------|---------------------------------|---------------------|
//! | `partial`                       | FULFILLED                       | PARTIALLY FULFILLED |
//! | null / `""` / `unfulfilled`     | FULFILLED, PARTIALLY FULFILLED  | VOID                |
//! | anything else                   | any                             | unchanged           |
//!
//! The rewrite is a single filtered UPDATE, so redelivered notifications are
//! no-ops.

use shared::models::{
    OrderWebhookPayload, ScanLogStatus, UpstreamFulfillmentStatus, order_numeric_id,
};
use shared::util::{display_timestamp, now_millis};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::BoxError;
use crate::db;
use crate::shopify::signature;

pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";
pub const SHOP_HEADER: &str = "x-shopify-shop-domain";
pub const TOPIC_HEADER: &str = "x-shopify-topic";

/// Topics whose body is a full order
pub const ORDER_TOPICS: [&str; 3] = ["orders/updated", "orders/fulfilled", "orders/partially_fulfilled"];

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Notification authenticity check failed: {0}")]
    NotificationAuthenticityFailed(&'static str),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Storage error: {0}")]
    Storage(BoxError),
}

/// Check the body HMAC; nothing may be read from the body before this passes
pub fn authenticate(body: &[u8], hmac: Option<&str>, secret: &str) -> Result<(), ReconcileError> {
    let hmac = hmac.ok_or(ReconcileError::NotificationAuthenticityFailed(
        "Missing HMAC header",
    ))?;
    signature::verify_webhook_hmac(body, hmac, secret)
        .map_err(ReconcileError::NotificationAuthenticityFailed)
}

/// Status a scan log moves to, or `None` to leave it alone
pub fn next_status(
    current: &ScanLogStatus,
    upstream: &UpstreamFulfillmentStatus,
) -> Option<ScanLogStatus> {
    match (upstream, current) {
        (UpstreamFulfillmentStatus::Partial, ScanLogStatus::Fulfilled) => {
            Some(ScanLogStatus::PartiallyFulfilled)
        }
        (
            UpstreamFulfillmentStatus::Unfulfilled(_),
            ScanLogStatus::Fulfilled | ScanLogStatus::PartiallyFulfilled,
        ) => Some(ScanLogStatus::Void),
        _ => None,
    }
}

/// Bulk rewrite derived from [`next_status`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub from: Vec<ScanLogStatus>,
    pub to: ScanLogStatus,
    pub details: String,
}

fn sync_note(to: &ScanLogStatus, upstream: &UpstreamFulfillmentStatus, now: i64) -> String {
    let at = display_timestamp(now);
    match to {
        ScanLogStatus::Void => format!(
            "Auto-voided via Shopify Sync: Order reverted to {} in Admin. [{at}]",
            upstream.observed()
        ),
        _ => format!("Partial fulfillment detected via Shopify Sync. Some items shipped. [{at}]"),
    }
}

pub fn plan(upstream: &UpstreamFulfillmentStatus, now: i64) -> Option<ReconcilePlan> {
    let known = [
        ScanLogStatus::Fulfilled,
        ScanLogStatus::PartiallyFulfilled,
        ScanLogStatus::Void,
    ];
    let transitions: Vec<(ScanLogStatus, ScanLogStatus)> = known
        .into_iter()
        .filter_map(|current| next_status(&current, upstream).map(|next| (current, next)))
        .collect();

    let to = transitions.first()?.1.clone();
    let from = transitions
        .into_iter()
        .filter(|(_, next)| *next == to)
        .map(|(current, _)| current)
        .collect();
    Some(ReconcilePlan {
        details: sync_note(&to, upstream, now),
        from,
        to,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    IgnoredTopic,
    NoTransition,
    Applied { to: ScanLogStatus, rows: u64 },
}

/// Apply the upstream status to every scan log of an order
pub async fn apply(
    pool: &SqlitePool,
    shop: &str,
    order_id: &str,
    upstream: &UpstreamFulfillmentStatus,
    now: i64,
) -> Result<ReconcileOutcome, ReconcileError> {
    let Some(plan) = plan(upstream, now) else {
        return Ok(ReconcileOutcome::NoTransition);
    };
    let rows = db::scan_logs::transition_status(
        pool,
        shop,
        order_id,
        &plan.from,
        &plan.to,
        &plan.details,
    )
    .await
    .map_err(ReconcileError::Storage)?;
    Ok(ReconcileOutcome::Applied { to: plan.to, rows })
}

/// Handle an authenticated order notification
pub async fn process(
    pool: &SqlitePool,
    shop: &str,
    topic: &str,
    body: &[u8],
) -> Result<ReconcileOutcome, ReconcileError> {
    if !topic.is_empty() && !ORDER_TOPICS.contains(&topic) {
        tracing::debug!(topic, "Ignoring webhook topic");
        return Ok(ReconcileOutcome::IgnoredTopic);
    }
    if shop.is_empty() {
        return Err(ReconcileError::MalformedPayload("missing shop domain".into()));
    }

    let payload: OrderWebhookPayload = serde_json::from_slice(body)
        .map_err(|e| ReconcileError::MalformedPayload(e.to_string()))?;
    let order_id = payload.order_gid();
    if order_id.is_empty() {
        return Err(ReconcileError::MalformedPayload("empty order id".into()));
    }

    let upstream = payload.upstream_status();
    let outcome = apply(pool, shop, &order_id, &upstream, now_millis()).await?;
    tracing::info!(
        shop,
        order = order_numeric_id(&order_id).unwrap_or(&order_id),
        upstream = upstream.observed(),
        outcome = ?outcome,
        "Order notification reconciled"
    );
    Ok(outcome)
}
