//! GraphQL admin API client
//!
//! One typed response struct per operation; connections are unwrapped from
//! `edges { node }` into plain vectors before leaving this module.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::models::{FulfillmentOrder, FulfillmentOrderLineItem};

use super::admin::{AdminApi, AdminApiError, CreatedFulfillment, FulfillmentCreate, UserError};

const FULFILLMENT_ORDERS_QUERY: &str = r#"
query FulfillmentOrders($id: ID!) {
  order(id: $id) {
    fulfillmentOrders(first: 20) {
      edges {
        node {
          id
          status
          lineItems(first: 100) {
            edges {
              node {
                id
                totalQuantity
                remainingQuantity
                lineItem { id }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const FULFILLMENT_CREATE_MUTATION: &str = r#"
mutation FulfillmentCreate($fulfillment: FulfillmentInput!) {
  fulfillmentCreate(fulfillment: $fulfillment) {
    fulfillment { id status }
    userErrors { field message }
  }
}
"#;

// ========== Wire types ==========

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

impl<T> Connection<T> {
    fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|e| e.node)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfillmentOrdersData {
    order: Option<OrderNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderNode {
    fulfillment_orders: Connection<FulfillmentOrderNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfillmentOrderNode {
    id: String,
    status: String,
    line_items: Connection<FulfillmentOrderLineItemNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfillmentOrderLineItemNode {
    id: String,
    total_quantity: u32,
    remaining_quantity: u32,
    line_item: LineItemRef,
}

#[derive(Debug, Deserialize)]
struct LineItemRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfillmentCreateData {
    fulfillment_create: Option<FulfillmentCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FulfillmentCreatePayload {
    fulfillment: Option<FulfillmentNode>,
    #[serde(default)]
    user_errors: Vec<UserErrorNode>,
}

#[derive(Debug, Deserialize)]
struct FulfillmentNode {
    id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserErrorNode {
    field: Option<Vec<String>>,
    message: String,
}

impl From<FulfillmentOrderNode> for FulfillmentOrder {
    fn from(node: FulfillmentOrderNode) -> Self {
        Self {
            id: node.id,
            status: node.status.into(),
            line_items: node
                .line_items
                .into_nodes()
                .map(|li| FulfillmentOrderLineItem {
                    id: li.id,
                    line_item_id: li.line_item.id,
                    total_quantity: li.total_quantity,
                    remaining_quantity: li.remaining_quantity,
                })
                .collect(),
        }
    }
}

/// Unwrap top-level `errors` / missing `data`
fn into_data<T>(response: GraphqlResponse<T>) -> Result<T, AdminApiError> {
    if !response.errors.is_empty() {
        return Err(AdminApiError::Graphql(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    response
        .data
        .ok_or_else(|| AdminApiError::Decode("response has neither data nor errors".into()))
}

fn decode_fulfillment_orders(
    response: GraphqlResponse<FulfillmentOrdersData>,
) -> Result<Vec<FulfillmentOrder>, AdminApiError> {
    let data = into_data(response)?;
    Ok(data
        .order
        .map(|order| {
            order
                .fulfillment_orders
                .into_nodes()
                .map(FulfillmentOrder::from)
                .collect()
        })
        .unwrap_or_default())
}

fn decode_fulfillment_create(
    response: GraphqlResponse<FulfillmentCreateData>,
) -> Result<CreatedFulfillment, AdminApiError> {
    let payload = into_data(response)?
        .fulfillment_create
        .ok_or_else(|| AdminApiError::Decode("fulfillmentCreate is null".into()))?;

    if !payload.user_errors.is_empty() {
        return Err(AdminApiError::UserErrors(
            payload
                .user_errors
                .into_iter()
                .map(|e| UserError {
                    field: e.field,
                    message: e.message,
                })
                .collect(),
        ));
    }

    Ok(payload
        .fulfillment
        .map(|f| CreatedFulfillment {
            id: f.id,
            status: f.status,
        })
        .unwrap_or_default())
}

// ========== Client ==========

/// Admin API client for a single store
#[derive(Debug, Clone)]
pub struct GraphqlAdminClient {
    client: Client,
    shop_domain: String,
    endpoint: String,
    access_token: String,
}

impl GraphqlAdminClient {
    pub fn new(
        shop_domain: &str,
        api_version: &str,
        access_token: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, AdminApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdminApiError::Transport(e.to_string()))?;
        let shop = shop_domain
            .trim_start_matches("https://")
            .trim_end_matches('/');
        Ok(Self {
            client,
            shop_domain: shop.to_string(),
            endpoint: format!("https://{shop}/admin/api/{api_version}/graphql.json"),
            access_token: access_token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphqlResponse<T>, AdminApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| AdminApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminApiError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AdminApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AdminApi for GraphqlAdminClient {
    fn shop_domain(&self) -> &str {
        &self.shop_domain
    }

    async fn fulfillment_orders(
        &self,
        order_id: &str,
    ) -> Result<Vec<FulfillmentOrder>, AdminApiError> {
        let response = self
            .execute(FULFILLMENT_ORDERS_QUERY, serde_json::json!({ "id": order_id }))
            .await?;
        decode_fulfillment_orders(response)
    }

    async fn create_fulfillment(
        &self,
        request: &FulfillmentCreate,
    ) -> Result<CreatedFulfillment, AdminApiError> {
        let variables = serde_json::json!({
            "fulfillment": {
                "lineItemsByFulfillmentOrder": [{
                    "fulfillmentOrderId": request.fulfillment_order_id,
                    "fulfillmentOrderLineItems": request.line_items,
                }],
                "notifyCustomer": request.notify_customer,
            }
        });
        let response = self.execute(FULFILLMENT_CREATE_MUTATION, variables).await?;
        decode_fulfillment_create(response)
    }
}
