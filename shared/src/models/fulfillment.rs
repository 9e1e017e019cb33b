//! Fulfillment Model
//!
//! Upstream fulfillment orders as seen by the scanner, plus the scan
//! request/response bodies exchanged with the scanner front-end.

use serde::{Deserialize, Serialize};

/// Fulfillment order status reported by the platform
///
/// Unknown statuses are preserved verbatim in `Other` so diagnostics can
/// echo exactly what upstream sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FulfillmentOrderStatus {
    Open,
    Scheduled,
    OnHold,
    InProgress,
    Closed,
    Cancelled,
    Incomplete,
    Other(String),
}

impl FulfillmentOrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "OPEN",
            Self::Scheduled => "SCHEDULED",
            Self::OnHold => "ON_HOLD",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
            Self::Cancelled => "CANCELLED",
            Self::Incomplete => "INCOMPLETE",
            Self::Other(s) => s,
        }
    }

    /// Whether a fulfillment can still be created against this status
    pub fn is_fulfillable(&self) -> bool {
        matches!(
            self,
            Self::Open | Self::Scheduled | Self::OnHold | Self::InProgress
        )
    }
}

impl From<&str> for FulfillmentOrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "OPEN" => Self::Open,
            "SCHEDULED" => Self::Scheduled,
            "ON_HOLD" => Self::OnHold,
            "IN_PROGRESS" => Self::InProgress,
            "CLOSED" => Self::Closed,
            "CANCELLED" => Self::Cancelled,
            "INCOMPLETE" => Self::Incomplete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FulfillmentOrderStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<FulfillmentOrderStatus> for String {
    fn from(status: FulfillmentOrderStatus) -> Self {
        match status {
            FulfillmentOrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FulfillmentOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfillment-order line item
///
/// `id` is the fulfillment-order line item id; `line_item_id` is the
/// underlying order line item. The fulfillment mutation only accepts `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOrderLineItem {
    pub id: String,
    pub line_item_id: String,
    pub total_quantity: u32,
    pub remaining_quantity: u32,
}

/// Upstream unit of fulfillable work for an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOrder {
    pub id: String,
    pub status: FulfillmentOrderStatus,
    pub line_items: Vec<FulfillmentOrderLineItem>,
}

impl FulfillmentOrder {
    /// Sum of remaining quantities across every line item
    pub fn total_remaining(&self) -> u64 {
        self.line_items
            .iter()
            .map(|li| u64::from(li.remaining_quantity))
            .sum()
    }
}

/// (fulfillment-order line item id, quantity) pair sent to the create mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentLineItemQuantity {
    pub id: String,
    pub quantity: u32,
}

/// Whether a fulfillment leaves anything outstanding on the fulfillment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentKind {
    Full,
    Partial,
}

impl FulfillmentKind {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial)
    }
}

/// Line item confirmed by the scanner session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedItem {
    /// Order line item id (not the fulfillment-order line item id)
    pub id: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Actor performing a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffData {
    pub name: String,
    pub email: String,
}

/// POST /api/proxy/fulfill body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFulfillmentRequest {
    pub order_id: String,
    #[serde(default)]
    pub verified_items: Vec<VerifiedItem>,
    pub staff_data: StaffData,
}

/// POST /api/proxy/fulfill response
///
/// Serializes to `{success:true, partiallyFulfilled, message}` or
/// `{success:false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanFulfillmentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partially_fulfilled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanFulfillmentResponse {
    pub fn fulfilled(kind: FulfillmentKind, message: impl Into<String>) -> Self {
        Self {
            success: true,
            partially_fulfilled: Some(kind.is_partial()),
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            partially_fulfilled: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
