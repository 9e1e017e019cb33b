//! Scan audit entries

use shared::models::{
    FulfillmentKind, NewScanLog, ScanLogStatus, StaffData, format_item_marker,
};
use shared::util::display_timestamp;
use sqlx::SqlitePool;

use super::FulfillmentError;
use super::matcher::{Classification, MatchedItems};
use crate::db;

pub fn status_for(kind: FulfillmentKind) -> ScanLogStatus {
    match kind {
        FulfillmentKind::Full => ScanLogStatus::Fulfilled,
        FulfillmentKind::Partial => ScanLogStatus::PartiallyFulfilled,
    }
}

fn summary(classification: &Classification) -> String {
    match classification.kind {
        FulfillmentKind::Partial => format!(
            "{} of {} items fulfilled",
            classification.fulfilled_now, classification.total_remaining_before
        ),
        FulfillmentKind::Full => format!("All {} items fulfilled", classification.fulfilled_now),
    }
}

/// `[ITEMS:<ids>] <LABEL> via Scanner UI - <summary>. [<local time>]`
pub fn details(matched: &MatchedItems, now: i64) -> String {
    let status = status_for(matched.classification.kind);
    format!(
        "{} {} via Scanner UI - {}. [{}]",
        format_item_marker(&matched.item_ids),
        status.label(),
        summary(&matched.classification),
        display_timestamp(now)
    )
}

pub fn build_entry(
    shop: &str,
    order_id: &str,
    staff: &StaffData,
    matched: &MatchedItems,
    now: i64,
) -> NewScanLog {
    NewScanLog {
        shop: shop.to_string(),
        order_id: order_id.to_string(),
        status: status_for(matched.classification.kind),
        scanned_by: staff.name.clone(),
        staff_email: staff.email.clone(),
        details: details(matched, now),
        item_ids: matched.item_ids.clone(),
        timestamp: now,
    }
}

/// Persist the entry; failures surface as `AuditWriteFailed`
pub async fn record(pool: &SqlitePool, entry: &NewScanLog) -> Result<i64, FulfillmentError> {
    db::scan_logs::insert(pool, entry).await.map_err(|e| {
        tracing::error!(
            order_id = %entry.order_id,
            status = %entry.status,
            error = %e,
            "Scan log write failed after upstream fulfillment"
        );
        FulfillmentError::AuditWriteFailed(e.to_string())
    })
}
