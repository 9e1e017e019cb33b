//! Webhook Model
//!
//! Order-update notification body and the upstream fulfillment status it
//! carries.

use serde::{Deserialize, Deserializer, Serialize};

use super::order::normalize_order_id;

/// Order webhook body (only the fields reconciliation reads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWebhookPayload {
    /// Numeric order id (the platform sends a JSON number)
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
}

impl OrderWebhookPayload {
    pub fn order_gid(&self) -> String {
        normalize_order_id(&self.id)
    }

    pub fn upstream_status(&self) -> UpstreamFulfillmentStatus {
        UpstreamFulfillmentStatus::parse(self.fulfillment_status.as_deref())
    }
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Order-level fulfillment status reported by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFulfillmentStatus {
    /// null, "" or "unfulfilled"; keeps the raw value for the audit note
    Unfulfilled(Option<String>),
    Partial,
    Other(String),
}

impl UpstreamFulfillmentStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unfulfilled(None),
            Some("") => Self::Unfulfilled(Some(String::new())),
            Some("unfulfilled") => Self::Unfulfilled(Some("unfulfilled".to_string())),
            Some("partial") => Self::Partial,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Observed value for audit notes; empty/null read as `unfulfilled`
    pub fn observed(&self) -> &str {
        match self {
            Self::Unfulfilled(Some(s)) if !s.is_empty() => s,
            Self::Unfulfilled(_) => "unfulfilled",
            Self::Partial => "partial",
            Self::Other(s) => s,
        }
    }
}
