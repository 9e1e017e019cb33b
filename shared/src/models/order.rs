//! Order reference helpers
//!
//! Orders arrive either as platform gids (`gid://shopify/Order/123`) from the
//! admin API or as bare numeric ids from webhooks. Scan logs always store the
//! gid form.

/// Global id prefix for orders
pub const ORDER_GID_PREFIX: &str = "gid://shopify/Order/";

/// Normalize an order id to its gid form
///
/// Numeric ids get the gid prefix; anything else is returned trimmed.
pub fn normalize_order_id(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{ORDER_GID_PREFIX}{raw}")
    } else {
        raw.to_string()
    }
}

/// Numeric tail of an order gid
pub fn order_numeric_id(gid: &str) -> Option<&str> {
    gid.strip_prefix(ORDER_GID_PREFIX)
        .filter(|tail| !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_gain_prefix() {
        assert_eq!(normalize_order_id("820982911946154508"), "gid://shopify/Order/820982911946154508");
        assert_eq!(normalize_order_id(" 42 "), "gid://shopify/Order/42");
    }

    #[test]
    fn gids_pass_through() {
        assert_eq!(normalize_order_id("gid://shopify/Order/42"), "gid://shopify/Order/42");
        assert_eq!(normalize_order_id(""), "");
    }

    #[test]
    fn numeric_tail() {
        assert_eq!(order_numeric_id("gid://shopify/Order/42"), Some("42"));
        assert_eq!(order_numeric_id("gid://shopify/Order/"), None);
        assert_eq!(order_numeric_id("gid://shopify/LineItem/42"), None);
    }
}
