//! Scan Log Model
//!
//! Locally persisted audit record of a scanner fulfillment. Rows are appended
//! per scan and only ever have their status/details rewritten by webhook
//! reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of the item marker embedded at the head of `details`
pub const ITEM_MARKER_PREFIX: &str = "[ITEMS:";

/// Status labels that count as "fulfilled" for read paths
pub const FULFILLED_FAMILY: [&str; 2] = ["FULFILLED", "PARTIALLY FULFILLED"];

/// Scan log status label
///
/// Stored as free text; anything outside the three known labels round-trips
/// through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScanLogStatus {
    Fulfilled,
    PartiallyFulfilled,
    Void,
    Other(String),
}

impl ScanLogStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Fulfilled => "FULFILLED",
            Self::PartiallyFulfilled => "PARTIALLY FULFILLED",
            Self::Void => "VOID",
            Self::Other(s) => s,
        }
    }

    /// FULFILLED or PARTIALLY FULFILLED
    pub fn is_fulfilled_family(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::PartiallyFulfilled)
    }
}

impl From<&str> for ScanLogStatus {
    fn from(s: &str) -> Self {
        match s {
            "FULFILLED" => Self::Fulfilled,
            "PARTIALLY FULFILLED" => Self::PartiallyFulfilled,
            "VOID" => Self::Void,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ScanLogStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ScanLogStatus> for String {
    fn from(status: ScanLogStatus) -> Self {
        match status {
            ScanLogStatus::Other(s) => s,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for ScanLogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scan log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLog {
    pub id: i64,
    pub shop: String,
    /// Normalized order gid
    pub order_id: String,
    pub status: ScanLogStatus,
    pub scanned_by: String,
    pub staff_email: String,
    pub details: String,
    /// Order line item ids this scan fulfilled
    pub item_ids: Vec<String>,
    /// Unix millis
    pub timestamp: i64,
}

/// New scan log entry (before insert)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScanLog {
    pub shop: String,
    pub order_id: String,
    pub status: ScanLogStatus,
    pub scanned_by: String,
    pub staff_email: String,
    pub details: String,
    pub item_ids: Vec<String>,
    pub timestamp: i64,
}

/// Format the `[ITEMS:a,b,c]` marker
///
/// Ids are joined verbatim and nothing is escaped. The marker only
/// round-trips ids that contain neither `,` nor `]`; the `item_ids` column
/// is the exact record.
pub fn format_item_marker<S: AsRef<str>>(ids: &[S]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    format!("{ITEM_MARKER_PREFIX}{joined}]")
}

/// Extract item ids from the marker inside a `details` string
///
/// Returns `None` when no complete marker is present. Segments are kept
/// verbatim (including whitespace); empty segments are dropped, so
/// `[ITEMS:]` yields an empty list.
pub fn parse_item_marker(details: &str) -> Option<Vec<String>> {
    let start = details.find(ITEM_MARKER_PREFIX)? + ITEM_MARKER_PREFIX.len();
    let rest = &details[start..];
    let end = rest.find(']')?;
    Some(
        rest[..end]
            .split(',')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    )
}

/// Which scan last covered a given line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttribution {
    pub log_id: i64,
    pub status: ScanLogStatus,
    pub scanned_by: String,
    pub staff_email: String,
    pub timestamp: i64,
}

/// Attribute each line item to the newest log that covered it
///
/// `logs` must be ordered newest-first (as returned by the store).
pub fn attribute_items(logs: &[ScanLog]) -> BTreeMap<String, ItemAttribution> {
    let mut out = BTreeMap::new();
    for log in logs {
        for item_id in &log.item_ids {
            out.entry(item_id.clone()).or_insert_with(|| ItemAttribution {
                log_id: log.id,
                status: log.status.clone(),
                scanned_by: log.scanned_by.clone(),
                staff_email: log.staff_email.clone(),
                timestamp: log.timestamp,
            });
        }
    }
    out
}

/// Pagination metadata for log search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_count.div_ceil(limit as u64)
        };
        Self {
            page,
            limit,
            total_count,
            total_pages,
        }
    }
}

/// One page of scan log search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanLogPage {
    pub logs: Vec<ScanLog>,
    pub pagination: Pagination,
}

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// FULFILLED rows written since local midnight
    pub scans_today: u64,
    /// Distinct orders with a FULFILLED row
    pub total_fulfilled: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn log(id: i64, items: &[&str], ts: i64) -> ScanLog {
        ScanLog {
            id,
            shop: "demo.myshopify.com".into(),
            order_id: "gid://shopify/Order/1".into(),
            status: ScanLogStatus::Fulfilled,
            scanned_by: format!("staff-{id}"),
            staff_email: format!("staff-{id}@example.com"),
            details: String::new(),
            item_ids: items.iter().map(|s| s.to_string()).collect(),
            timestamp: ts,
        }
    }

    #[test]
    fn status_labels_round_trip() {
        for label in ["FULFILLED", "PARTIALLY FULFILLED", "VOID", "MANUAL"] {
            let status = ScanLogStatus::from(label);
            assert_eq!(String::from(status), label);
        }
        assert_eq!(ScanLogStatus::from("VOID"), ScanLogStatus::Void);
        assert!(ScanLogStatus::PartiallyFulfilled.is_fulfilled_family());
        assert!(!ScanLogStatus::Void.is_fulfilled_family());
    }

    #[test]
    fn marker_recovers_written_ids_as_set() {
        let ids = vec![
            "gid://shopify/LineItem/3".to_string(),
            "gid://shopify/LineItem/1".to_string(),
            "gid://shopify/LineItem/2".to_string(),
        ];
        let details = format!("{} FULFILLED via Scanner UI", format_item_marker(&ids));
        let parsed = parse_item_marker(&details).unwrap();

        let written: BTreeSet<_> = ids.into_iter().collect();
        let recovered: BTreeSet<_> = parsed.into_iter().collect();
        assert_eq!(written, recovered);
    }

    #[test]
    fn marker_single_and_empty() {
        assert_eq!(format_item_marker(&["P1"]), "[ITEMS:P1]");
        assert_eq!(parse_item_marker("[ITEMS:P1] done"), Some(vec!["P1".to_string()]));
        assert_eq!(parse_item_marker("[ITEMS:] nothing"), Some(vec![]));
    }

    #[test]
    fn marker_keeps_whitespace_in_ids() {
        let ids = [" P1", "P 2", "P3 "];
        let parsed = parse_item_marker(&format_item_marker(&ids)).unwrap();
        assert_eq!(parsed, ids);
    }

    #[test]
    fn marker_missing_or_unterminated() {
        assert_eq!(parse_item_marker("Fulfillment via Scanner UI"), None);
        assert_eq!(parse_item_marker("[ITEMS:P1,P2"), None);
    }

    #[test]
    fn attribution_prefers_newest_log() {
        // newest first
        let logs = vec![log(2, &["B", "C"], 200), log(1, &["A", "B"], 100)];
        let attribution = attribute_items(&logs);

        assert_eq!(attribution.len(), 3);
        assert_eq!(attribution["A"].log_id, 1);
        assert_eq!(attribution["B"].log_id, 2);
        assert_eq!(attribution["C"].log_id, 2);
        assert_eq!(attribution["B"].scanned_by, "staff-2");
    }

    #[test]
    fn pagination_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(2, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 0, 5).total_pages, 0);
    }
}
