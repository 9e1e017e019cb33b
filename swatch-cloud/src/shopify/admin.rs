//! Admin API seam

use async_trait::async_trait;
use shared::models::{FulfillmentLineItemQuantity, FulfillmentOrder};
use thiserror::Error;

/// Field-level error returned by a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AdminApiError {
    /// Network failure or non-success HTTP status
    #[error("{0}")]
    Transport(String),

    /// Top-level GraphQL `errors`
    #[error("{}", .0.join(", "))]
    Graphql(Vec<String>),

    /// Mutation accepted the request but reported `userErrors`
    #[error("{}", first_message(.0))]
    UserErrors(Vec<UserError>),

    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

fn first_message(errors: &[UserError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("unknown error")
}

/// Fulfillment creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentCreate {
    pub fulfillment_order_id: String,
    pub line_items: Vec<FulfillmentLineItemQuantity>,
    pub notify_customer: bool,
}

/// Fulfillment created upstream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedFulfillment {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// Admin operations used by the fulfillment chain
///
/// Implementations must be cheap to share (`Arc<dyn AdminApi>` lives in
/// `AppState`).
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Store domain this client is authorized against (`example.myshopify.com`)
    fn shop_domain(&self) -> &str;

    /// Every fulfillment order of an order, in upstream order, with line items
    async fn fulfillment_orders(&self, order_id: &str)
    -> Result<Vec<FulfillmentOrder>, AdminApiError>;

    /// Create one fulfillment for the given fulfillment order
    async fn create_fulfillment(
        &self,
        request: &FulfillmentCreate,
    ) -> Result<CreatedFulfillment, AdminApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_display_first_message() {
        let err = AdminApiError::UserErrors(vec![
            UserError {
                field: Some(vec!["fulfillment".into(), "lineItems".into()]),
                message: "Quantity exceeds remaining".into(),
            },
            UserError {
                field: None,
                message: "second".into(),
            },
        ]);
        assert_eq!(err.to_string(), "Quantity exceeds remaining");
        assert_eq!(AdminApiError::UserErrors(vec![]).to_string(), "unknown error");
    }

    #[test]
    fn graphql_errors_join() {
        let err = AdminApiError::Graphql(vec!["Throttled".into(), "Access denied".into()]);
        assert_eq!(err.to_string(), "Throttled, Access denied");
    }
}
