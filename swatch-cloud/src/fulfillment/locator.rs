//! Fulfillment order selection

use shared::models::FulfillmentOrder;

use super::{FoundFulfillmentOrder, FulfillmentError};
use crate::shopify::AdminApi;

/// Fetch an order's fulfillment orders and pick the one to act on
pub async fn locate(
    admin: &dyn AdminApi,
    order_id: &str,
) -> Result<FulfillmentOrder, FulfillmentError> {
    let orders = admin.fulfillment_orders(order_id).await?;
    tracing::debug!(order_id, count = orders.len(), "Fetched fulfillment orders");
    select_fulfillable(orders)
}

/// First fulfillment order (in upstream order) whose status still accepts
/// fulfillments
pub fn select_fulfillable(
    orders: Vec<FulfillmentOrder>,
) -> Result<FulfillmentOrder, FulfillmentError> {
    let mut found = Vec::with_capacity(orders.len());
    for fo in orders {
        if fo.status.is_fulfillable() {
            return Ok(fo);
        }
        found.push(FoundFulfillmentOrder {
            id: fo.id,
            status: fo.status,
        });
    }
    Err(FulfillmentError::NoFulfillableOrder { found })
}
