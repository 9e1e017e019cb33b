mod common;

use common::*;
use http::StatusCode;
use serde_json::json;
use shared::models::ScanLogStatus;
use swatch_cloud::AppState;
use swatch_cloud::db;

const ORDER: &str = "gid://shopify/Order/1001";

/// Scan the single line item through the proxy endpoint
async fn scan(app: &axum::Router) {
    let body = json(
        post_json(
            app,
            &signed("/api/proxy/fulfill"),
            json!({
                "orderId": "1001",
                "verifiedItems": [{"id": "P1", "quantity": 1}],
                "staffData": {"name": "Ana", "email": "ana@example.com"}
            }),
        )
        .await,
    )
    .await;
    assert_eq!(body["success"], true);
}

async fn statuses(state: &AppState) -> Vec<ScanLogStatus> {
    db::scan_logs::history(&state.pool, SHOP, ORDER)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.status)
        .collect()
}

async fn scanned_app(remaining: u32) -> (axum::Router, AppState) {
    let admin = FakeAdmin::with_orders(vec![fulfillment_order(
        "FO1",
        "OPEN",
        vec![line("FLI1", "P1", remaining, remaining)],
    )]);
    let (app, state) = app(admin).await;
    scan(&app).await;
    (app, state)
}

#[tokio::test]
async fn unfulfilled_notification_voids_logs() {
    let (app, state) = scanned_app(1).await;
    assert_eq!(statuses(&state).await, vec![ScanLogStatus::Fulfilled]);

    let body = r#"{"id": 1001, "fulfillment_status": null, "name": "Swatch order"}"#;
    let response = post_webhook(&app, body, Some(webhook_hmac(body))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(statuses(&state).await, vec![ScanLogStatus::Void]);

    // redelivery changes nothing
    let before = db::scan_logs::history(&state.pool, SHOP, ORDER).await.unwrap();
    let response = post_webhook(&app, body, Some(webhook_hmac(body))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let after = db::scan_logs::history(&state.pool, SHOP, ORDER).await.unwrap();
    assert_eq!(before, after);
    assert_eq!(after[0].item_ids, vec!["P1"]);
}

#[tokio::test]
async fn partial_notification_downgrades_fulfilled() {
    let (app, state) = scanned_app(1).await;

    let body = r#"{"id": "1001", "fulfillment_status": "partial"}"#;
    let response = post_webhook(&app, body, Some(webhook_hmac(body))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(statuses(&state).await, vec![ScanLogStatus::PartiallyFulfilled]);

    let latest = db::scan_logs::latest_fulfilled(&state.pool, SHOP, ORDER)
        .await
        .unwrap()
        .unwrap();
    assert!(latest.details.starts_with("Partial fulfillment detected via Shopify Sync."));

    // attribution survives the details rewrite
    let attribution = json(get(&app, &signed("/api/orders/1001/attribution")).await).await;
    assert_eq!(attribution["P1"]["status"], "PARTIALLY FULFILLED");
}

#[tokio::test]
async fn fulfilled_notification_is_a_no_op() {
    let (app, state) = scanned_app(1).await;

    let body = r#"{"id": 1001, "fulfillment_status": "fulfilled"}"#;
    let response = post_webhook(&app, body, Some(webhook_hmac(body))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(statuses(&state).await, vec![ScanLogStatus::Fulfilled]);
}

#[tokio::test]
async fn forged_notifications_are_rejected_without_mutation() {
    let (app, state) = scanned_app(1).await;
    let body = r#"{"id": 1001, "fulfillment_status": null}"#;

    let response = post_webhook(&app, body, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_webhook(&app, body, Some(webhook_hmac(r#"{"id": 1002}"#))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_webhook(&app, body, Some("bm90LWEtc2lnbmF0dXJl".into())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(statuses(&state).await, vec![ScanLogStatus::Fulfilled]);
}

#[tokio::test]
async fn authentic_but_malformed_notifications_are_acknowledged() {
    let (app, state) = scanned_app(1).await;

    let body = "{not json";
    let response = post_webhook(&app, body, Some(webhook_hmac(body))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = r#"{"fulfillment_status": null}"#;
    let response = post_webhook(&app, body, Some(webhook_hmac(body))).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(statuses(&state).await, vec![ScanLogStatus::Fulfilled]);
}
