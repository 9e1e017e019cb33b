//! Fulfillment creation

use super::FulfillmentError;
use super::matcher::MatchedItems;
use crate::shopify::{AdminApi, CreatedFulfillment, FulfillmentCreate};

/// Create one fulfillment covering exactly the matched pairs
///
/// Customers are never notified from the scanner. No retry: a rejected
/// request (e.g. another scan already shipped the units) is reported as is.
pub async fn submit(
    admin: &dyn AdminApi,
    fulfillment_order_id: &str,
    matched: &MatchedItems,
) -> Result<CreatedFulfillment, FulfillmentError> {
    let request = FulfillmentCreate {
        fulfillment_order_id: fulfillment_order_id.to_string(),
        line_items: matched.line_items.clone(),
        notify_customer: false,
    };
    let created = admin.create_fulfillment(&request).await?;
    tracing::info!(
        fulfillment_order_id,
        fulfillment_id = created.id.as_deref().unwrap_or("-"),
        fulfilled_now = matched.classification.fulfilled_now,
        remaining = matched.classification.total_remaining_after,
        "Fulfillment created"
    );
    Ok(created)
}
