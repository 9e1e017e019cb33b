#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, Response};
use parking_lot::Mutex;
use shared::models::{FulfillmentOrder, FulfillmentOrderLineItem, FulfillmentOrderStatus};
use swatch_cloud::shopify::signature::{sign_proxy_params, sign_webhook};
use swatch_cloud::shopify::{
    AdminApi, AdminApiError, CreatedFulfillment, FulfillmentCreate, UserError,
};
use swatch_cloud::{AppState, create_router};
use tower::ServiceExt;

pub const SHOP: &str = "demo.myshopify.com";
pub const SECRET: &str = "test-secret";

/// In-memory admin API that applies fulfillments to its own orders
#[derive(Default)]
pub struct FakeAdmin {
    pub orders: Mutex<Vec<FulfillmentOrder>>,
    pub created: Mutex<Vec<FulfillmentCreate>>,
    pub query_errors: Mutex<Option<Vec<String>>>,
}

impl FakeAdmin {
    pub fn with_orders(orders: Vec<FulfillmentOrder>) -> Arc<Self> {
        Arc::new(Self {
            orders: Mutex::new(orders),
            ..Default::default()
        })
    }
}

#[async_trait]
impl AdminApi for FakeAdmin {
    fn shop_domain(&self) -> &str {
        SHOP
    }

    async fn fulfillment_orders(
        &self,
        _order_id: &str,
    ) -> Result<Vec<FulfillmentOrder>, AdminApiError> {
        if let Some(errors) = self.query_errors.lock().clone() {
            return Err(AdminApiError::Graphql(errors));
        }
        Ok(self.orders.lock().clone())
    }

    async fn create_fulfillment(
        &self,
        request: &FulfillmentCreate,
    ) -> Result<CreatedFulfillment, AdminApiError> {
        let mut orders = self.orders.lock();
        let fo = orders
            .iter_mut()
            .find(|fo| fo.id == request.fulfillment_order_id)
            .ok_or_else(|| {
                AdminApiError::UserErrors(vec![UserError {
                    field: Some(vec!["fulfillmentOrderId".into()]),
                    message: "Fulfillment order does not exist.".into(),
                }])
            })?;

        for pair in &request.line_items {
            let ok = fo
                .line_items
                .iter()
                .any(|li| li.id == pair.id && li.remaining_quantity >= pair.quantity);
            if !ok {
                return Err(AdminApiError::UserErrors(vec![UserError {
                    field: None,
                    message: "Invalid fulfillment order line item quantity requested.".into(),
                }]));
            }
        }
        for pair in &request.line_items {
            if let Some(li) = fo.line_items.iter_mut().find(|li| li.id == pair.id) {
                li.remaining_quantity -= pair.quantity;
            }
        }
        if fo.total_remaining() == 0 {
            fo.status = FulfillmentOrderStatus::Closed;
        }

        let mut created = self.created.lock();
        created.push(request.clone());
        Ok(CreatedFulfillment {
            id: Some(format!("gid://shopify/Fulfillment/{}", created.len())),
            status: Some("SUCCESS".into()),
        })
    }
}

pub fn line(id: &str, line_item_id: &str, total: u32, remaining: u32) -> FulfillmentOrderLineItem {
    FulfillmentOrderLineItem {
        id: id.into(),
        line_item_id: line_item_id.into(),
        total_quantity: total,
        remaining_quantity: remaining,
    }
}

pub fn fulfillment_order(id: &str, status: &str, lines: Vec<FulfillmentOrderLineItem>) -> FulfillmentOrder {
    FulfillmentOrder {
        id: id.into(),
        status: status.into(),
        line_items: lines,
    }
}

pub async fn app(admin: Arc<FakeAdmin>) -> (Router, AppState) {
    let pool = swatch_cloud::db::connect_in_memory().await.unwrap();
    let state = AppState::with_admin(pool, admin, SECRET);
    (create_router(state.clone()), state)
}

/// Path with a valid app proxy query string appended
pub fn signed(path: &str) -> String {
    signed_with(path, &[])
}

pub fn signed_with(path: &str, extra: &[(&str, &str)]) -> String {
    signed_for(SHOP, path, extra)
}

/// Valid app proxy query string for an arbitrary shop
pub fn signed_for(shop: &str, path: &str, extra: &[(&str, &str)]) -> String {
    let mut params: Vec<(String, String)> = vec![
        ("shop".into(), shop.into()),
        ("timestamp".into(), "1700000000".into()),
        ("path_prefix".into(), "/apps/swatch".into()),
    ];
    params.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    let signature = sign_proxy_params(&params, SECRET).unwrap();
    params.push(("signature".into(), signature));
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{path}?{}", query.join("&"))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_webhook(app: &Router, body: &str, hmac: Option<String>) -> Response<Body> {
    let mut builder = Request::post("/webhooks/orders/updated")
        .header("content-type", "application/json")
        .header("x-shopify-shop-domain", SHOP)
        .header("x-shopify-topic", "orders/updated");
    if let Some(hmac) = hmac {
        builder = builder.header("x-shopify-hmac-sha256", hmac);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub fn webhook_hmac(body: &str) -> String {
    sign_webhook(body.as_bytes(), SECRET).unwrap()
}

pub async fn json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
