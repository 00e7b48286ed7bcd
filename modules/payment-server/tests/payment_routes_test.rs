//! Router-level tests: requests go through the full axum stack via `oneshot`.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use payment_server::{
    config::{ApprovedCard, FileConfig, PaymentsConfig},
    ledger::PaymentRecord,
    router, AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn state(ledger_path: &Path, max_limit: f64) -> Arc<AppState> {
    let config = FileConfig {
        payments: PaymentsConfig {
            max_limit,
            default_amount: 50.0,
            ledger_path: ledger_path.to_path_buf(),
            approved_cards: vec![ApprovedCard {
                number: "4111111111111111".into(),
                holder: "James McKenna".into(),
            }],
        },
        ..FileConfig::default()
    };
    Arc::new(AppState::from_config(&config))
}

fn payment_body(card: &str) -> Value {
    json!({
        "first_name": "James",
        "last_name": "McKenna",
        "credit_card_number": card,
        "expiration_date": "12/27",
        "ccv": "123",
        "shipping_address": "2199 S University Blvd",
    })
}

async fn post(app: &Router, path: &str, content_type: Option<&str>, body: String) -> (StatusCode, Value) {
    let mut req = Request::builder().method("POST").uri(path);
    if let Some(ct) = content_type {
        req = req.header(header::CONTENT_TYPE, ct);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post_json(app: &Router, path: &str, body: &Value) -> (StatusCode, Value) {
    post(app, path, Some("application/json"), body.to_string()).await
}

#[tokio::test]
async fn approved_payment_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let ledger_path = dir.path().join("payments.json");
    let state = state(&ledger_path, 1000.0);
    let app = router(state.clone(), None);

    let (status, body) = post_json(&app, "/submit-payment", &payment_body("4111111111111111")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["message"], "Payment of $50.00 submitted for James McKenna.");

    let records: Vec<PaymentRecord> =
        serde_json::from_slice(&std::fs::read(&ledger_path).unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, 50.0);
    assert_eq!(records[0].shipping_address, "2199 S University Blvd");
}

#[tokio::test]
async fn legacy_submit_path_is_an_alias() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let (status, _) = post_json(&app, "/submit", &payment_body("4111111111111111")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn non_json_content_type_is_415() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let (status, body) = post(
        &app,
        "/submit-payment",
        Some("application/x-www-form-urlencoded"),
        "first_name=James".into(),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "Unsupported type, only application/json applicable");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let (status, body) = post(&app, "/submit-payment", Some("application/json"), "{oops".into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_field_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let mut body = payment_body("4111111111111111");
    body["ccv"] = json!("");
    let (status, resp) = post_json(&app, "/submit-payment", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["error"].as_str().unwrap().starts_with("Missing one or more required fields"));
}

#[tokio::test]
async fn falsy_non_string_field_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let ledger_path = dir.path().join("p.json");
    let app = router(state(&ledger_path, 1000.0), None);

    for falsy in [json!(0), json!(false), json!(null)] {
        let mut body = payment_body("4111111111111111");
        body["ccv"] = falsy.clone();
        let (status, resp) = post_json(&app, "/submit-payment", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "ccv = {falsy}");
        assert!(resp["error"].as_str().unwrap().starts_with("Missing one or more required fields"));
    }
    assert!(!ledger_path.exists());
}

#[tokio::test]
async fn unknown_card_is_403() {
    let dir = tempfile::tempdir().unwrap();
    let ledger_path = dir.path().join("p.json");
    let app = router(state(&ledger_path, 1000.0), None);

    let (status, body) = post_json(&app, "/submit-payment", &payment_body("4000000000000002")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "declined");
    assert_eq!(body["message"], "Card not recognized. Payment rejected.");
    assert!(!ledger_path.exists());
}

#[tokio::test]
async fn limit_is_enforced_per_card_with_402() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 120.0), None);

    let mut body = payment_body("4111111111111111");
    body["amount"] = json!("100");
    let (first, _) = post_json(&app, "/submit-payment", &body).await;
    assert_eq!(first, StatusCode::OK);

    body["amount"] = json!(25);
    let (second, resp) = post_json(&app, "/submit-payment", &body).await;
    assert_eq!(second, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(resp["status"], "declined");
    assert_eq!(resp["message"], "Card exceeded limit. Current: $100.00, attempted: $25.00");
}

#[tokio::test]
async fn unwritable_ledger_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("nope").join("p.json"), 1000.0), None);

    let (status, body) = post_json(&app, "/submit-payment", &payment_body("4111111111111111")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Failed to write to file"));
}

#[tokio::test]
async fn process_acknowledges_transfer() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let (status, body) = post_json(
        &app,
        "/process",
        &json!({"payer": "James", "payee": "Dutch Bros", "amount": 10.99}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment of $10.99 from James to Dutch Bros has been received.");
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn process_without_payment_fields_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let (status, body) = post_json(
        &app,
        "/process",
        &json!({"user": "Joe", "location": "DU", "time": 1300}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing payment fields (payer, payee, amount)");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), None);

    let (status, _) = post_json(&app, "/elsewhere", &json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_post_is_404_with_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("checkout.html"), "<html>").unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), Some(dir.path()));

    let (status, _) = post_json(&app, "/elsewhere", &json!({"a": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(&app, "/checkout.html", &json!({"a": 1})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_static_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), Some(dir.path()));

    let resp = app
        .oneshot(Request::builder().uri("/nope.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_dir_serves_checkout_page() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("checkout.html"), "<button id=\"checkoutBtn\">").unwrap();
    let app = router(state(&dir.path().join("p.json"), 1000.0), Some(dir.path()));

    let resp = app
        .oneshot(Request::builder().uri("/checkout.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("checkoutBtn"));
}
