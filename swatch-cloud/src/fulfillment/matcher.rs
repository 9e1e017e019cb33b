//! Verified item → fulfillment-order line item matching

use std::collections::HashMap;

use shared::models::{FulfillmentKind, FulfillmentLineItemQuantity, FulfillmentOrder, VerifiedItem};

use super::FulfillmentError;

/// Partial/full outcome of a fulfillment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: FulfillmentKind,
    /// Remaining units across the whole fulfillment order before submitting
    pub total_remaining_before: u64,
    pub fulfilled_now: u64,
    pub total_remaining_after: u64,
}

pub fn classify(total_remaining_before: u64, fulfilled_now: u64) -> Classification {
    let total_remaining_after = total_remaining_before.saturating_sub(fulfilled_now);
    Classification {
        kind: if total_remaining_after > 0 {
            FulfillmentKind::Partial
        } else {
            FulfillmentKind::Full
        },
        total_remaining_before,
        fulfilled_now,
        total_remaining_after,
    }
}

/// Line items selected for one fulfillment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedItems {
    /// Pairs for the create mutation, in fulfillment-order line order
    pub line_items: Vec<FulfillmentLineItemQuantity>,
    /// Order line item ids covered by `line_items` (deduplicated)
    pub item_ids: Vec<String>,
    pub classification: Classification,
}

/// Match verified items against a fulfillment order
///
/// A verified entry without a quantity asks for everything still remaining;
/// any request is capped at the remaining quantity. Line items with nothing
/// left are skipped.
pub fn match_items(
    order: &FulfillmentOrder,
    verified: &[VerifiedItem],
) -> Result<MatchedItems, FulfillmentError> {
    let mut requested: HashMap<&str, Option<u32>> = HashMap::with_capacity(verified.len());
    for item in verified {
        requested.entry(item.id.as_str()).or_insert(item.quantity);
    }

    let mut line_items = Vec::new();
    let mut item_ids: Vec<String> = Vec::new();
    for li in &order.line_items {
        let Some(&quantity) = requested.get(li.line_item_id.as_str()) else {
            continue;
        };
        let quantity = quantity
            .unwrap_or(li.remaining_quantity)
            .min(li.remaining_quantity);
        if quantity == 0 {
            continue;
        }
        line_items.push(FulfillmentLineItemQuantity {
            id: li.id.clone(),
            quantity,
        });
        if !item_ids.contains(&li.line_item_id) {
            item_ids.push(li.line_item_id.clone());
        }
    }

    if line_items.is_empty() {
        return Err(FulfillmentError::NoMatchingItems);
    }

    let fulfilled_now = line_items.iter().map(|p| u64::from(p.quantity)).sum();
    Ok(MatchedItems {
        line_items,
        item_ids,
        classification: classify(order.total_remaining(), fulfilled_now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{FulfillmentOrderLineItem, FulfillmentOrderStatus};

    fn line(id: &str, line_item_id: &str, total: u32, remaining: u32) -> FulfillmentOrderLineItem {
        FulfillmentOrderLineItem {
            id: id.into(),
            line_item_id: line_item_id.into(),
            total_quantity: total,
            remaining_quantity: remaining,
        }
    }

    fn order(lines: Vec<FulfillmentOrderLineItem>) -> FulfillmentOrder {
        FulfillmentOrder {
            id: "FO".into(),
            status: FulfillmentOrderStatus::Open,
            line_items: lines,
        }
    }

    fn verified(id: &str, quantity: Option<u32>) -> VerifiedItem {
        VerifiedItem {
            id: id.into(),
            quantity,
        }
    }

    #[test]
    fn quantity_is_clamped_to_remaining() {
        let fo = order(vec![line("FLI1", "P1", 5, 3)]);
        let matched = match_items(&fo, &[verified("P1", Some(5))]).unwrap();
        assert_eq!(matched.line_items[0].quantity, 3);

        let matched = match_items(&fo, &[verified("P1", Some(2))]).unwrap();
        assert_eq!(matched.line_items[0].quantity, 2);
    }

    #[test]
    fn missing_quantity_uses_remaining_not_total() {
        let fo = order(vec![line("FLI1", "P1", 5, 2)]);
        let matched = match_items(&fo, &[verified("P1", None)]).unwrap();
        assert_eq!(matched.line_items[0].quantity, 2);
        assert_eq!(matched.classification.kind, FulfillmentKind::Full);
    }

    #[test]
    fn classification_boundary() {
        let full = classify(10, 10);
        assert_eq!(full.kind, FulfillmentKind::Full);
        assert_eq!(full.total_remaining_after, 0);

        let partial = classify(10, 7);
        assert_eq!(partial.kind, FulfillmentKind::Partial);
        assert_eq!(partial.total_remaining_after, 3);

        assert_eq!(classify(3, 5).total_remaining_after, 0);
    }

    #[test]
    fn partial_when_other_lines_remain() {
        let fo = order(vec![line("FLI1", "P1", 4, 4), line("FLI2", "P2", 6, 6)]);
        let matched = match_items(&fo, &[verified("P1", None)]).unwrap();
        assert_eq!(matched.item_ids, vec!["P1"]);
        assert_eq!(matched.classification, classify(10, 4));
        assert!(matched.classification.kind.is_partial());
    }

    #[test]
    fn large_quantities_do_not_overflow() {
        let half = u32::MAX / 2 + 1;
        let fo = order(vec![line("FLI1", "P1", half, half), line("FLI2", "P2", half, half)]);
        let matched = match_items(&fo, &[verified("P1", None)]).unwrap();
        assert_eq!(matched.classification.total_remaining_before, 2 * u64::from(half));
        assert_eq!(matched.classification.total_remaining_after, u64::from(half));
        assert!(matched.classification.kind.is_partial());

        let matched = match_items(&fo, &[verified("P1", None), verified("P2", None)]).unwrap();
        assert_eq!(matched.classification.fulfilled_now, 2 * u64::from(half));
        assert_eq!(matched.classification.kind, FulfillmentKind::Full);
    }

    #[test]
    fn no_match_fails() {
        let fo = order(vec![line("FLI1", "A", 1, 1)]);
        assert!(matches!(
            match_items(&fo, &[verified("B", None)]),
            Err(FulfillmentError::NoMatchingItems)
        ));
        assert!(matches!(match_items(&fo, &[]), Err(FulfillmentError::NoMatchingItems)));
    }

    #[test]
    fn exhausted_lines_are_not_emitted() {
        let fo = order(vec![line("FLI1", "P1", 2, 0), line("FLI2", "P2", 2, 2)]);
        let matched = match_items(&fo, &[verified("P1", None), verified("P2", Some(1))]).unwrap();
        assert_eq!(
            matched.line_items,
            vec![FulfillmentLineItemQuantity {
                id: "FLI2".into(),
                quantity: 1
            }]
        );
        assert_eq!(matched.item_ids, vec!["P2"]);

        let fo = order(vec![line("FLI1", "P1", 2, 0)]);
        assert!(matches!(
            match_items(&fo, &[verified("P1", None)]),
            Err(FulfillmentError::NoMatchingItems)
        ));
    }

    #[test]
    fn first_verified_entry_wins() {
        let fo = order(vec![line("FLI1", "P1", 5, 5)]);
        let matched = match_items(&fo, &[verified("P1", Some(1)), verified("P1", Some(4))]).unwrap();
        assert_eq!(matched.line_items.len(), 1);
        assert_eq!(matched.line_items[0].quantity, 1);
    }

    #[test]
    fn ids_match_exactly() {
        let fo = order(vec![line("FLI1", "gid://shopify/LineItem/1", 1, 1)]);
        assert!(match_items(&fo, &[verified("gid://shopify/LineItem/10", None)]).is_err());
        assert!(match_items(&fo, &[verified("1", None)]).is_err());
    }
}
