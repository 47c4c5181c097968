//! Integration tests for the payments HTTP API.
//!
//! Uses axum-test against the real router with in-memory storage and the
//! simulated payment provider.

mod common;

use axum::http::StatusCode;
use common::{spawn_app, token_for};
use estate_pay::domain::intent::IntentStatus;
use estate_pay::interfaces::http::{ErrorResponse, HealthResponse, PricingResponse};
use serde_json::{Value, json};

async fn create_deposit(app: &common::TestApp, user_id: &str) -> Value {
    let response = app
        .server
        .post("/api/payment-intent")
        .json(&json!({
            "type": "deposit",
            "propertyId": "prop-lekki",
            "userId": user_id,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()
}

fn error_message(response: &axum_test::TestResponse) -> String {
    response.json::<ErrorResponse>().error
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = spawn_app().await;
    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_pricing_endpoint() {
    let app = spawn_app().await;
    let pricing: PricingResponse = app.server.get("/api/pricing").await.json();

    assert_eq!(pricing.currency, "ngn");
    assert_eq!(pricing.deposit_minor, 5_000_000);
    let tiers: Vec<&str> = pricing.tiers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tiers, vec!["Basic Boost", "Pro Boost", "Premium Boost"]);
}

#[tokio::test]
async fn test_create_deposit_intent() {
    let app = spawn_app().await;
    let body = create_deposit(&app, "user-1").await;

    assert_eq!(body["amount"], 5_000_000);
    assert_eq!(body["paymentIntentId"], "pi_sim_1");
    assert_eq!(body["clientSecret"], "pi_sim_1_secret_1");
}

#[tokio::test]
async fn test_create_subscription_intent() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/payment-intent")
        .json(&json!({ "type": "subscription", "tier": "premium", "userId": "user-1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["amount"], 3_000_000);
}

#[tokio::test]
async fn test_create_intent_validation_errors() {
    let app = spawn_app().await;
    let cases = [
        (json!({ "userId": "user-1" }), StatusCode::BAD_REQUEST, "Missing required fields"),
        (json!({ "type": "deposit" }), StatusCode::BAD_REQUEST, "Missing required fields"),
        (
            json!({ "type": "deposit", "userId": "user-1" }),
            StatusCode::BAD_REQUEST,
            "Property ID required for deposits",
        ),
        (
            json!({ "type": "deposit", "userId": "user-1", "propertyId": "prop-missing" }),
            StatusCode::NOT_FOUND,
            "Property not found",
        ),
        (
            json!({ "type": "subscription", "userId": "user-1", "tier": "gold" }),
            StatusCode::BAD_REQUEST,
            "Invalid subscription tier",
        ),
        (
            json!({ "type": "refund", "userId": "user-1" }),
            StatusCode::BAD_REQUEST,
            "Invalid payment type",
        ),
    ];

    for (body, status, message) in cases {
        let response = app.server.post("/api/payment-intent").json(&body).await;
        assert_eq!(response.status_code(), status, "body: {body}");
        assert_eq!(error_message(&response), message);
    }
}

#[tokio::test]
async fn test_create_intent_rejects_malformed_json() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/payment-intent")
        .text("{not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), "Invalid JSON body");
}

#[tokio::test]
async fn test_provider_outage_is_bad_gateway() {
    let app = spawn_app().await;
    app.provider.set_outage(Some("api_connection_error")).await;

    let response = app
        .server
        .post("/api/payment-intent")
        .json(&json!({ "type": "subscription", "tier": "basic", "userId": "user-1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(error_message(&response).contains("api_connection_error"));
}

#[tokio::test]
async fn test_confirm_flow() {
    let app = spawn_app().await;
    let body = create_deposit(&app, "user-1").await;
    let intent_id = body["paymentIntentId"].as_str().unwrap().to_string();

    app.provider
        .set_status(&intent_id, IntentStatus::Succeeded, false)
        .await
        .unwrap();

    let response = app
        .server
        .post("/api/payment-intent/confirm")
        .json(&json!({ "paymentIntentId": intent_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let record: Value = response.json();
    assert_eq!(record["status"], "completed");
    assert_eq!(record["provider_payment_intent_id"], intent_id.as_str());
}

#[tokio::test]
async fn test_confirm_requires_intent_id() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/payment-intent/confirm")
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), "Payment intent ID required");
}

#[tokio::test]
async fn test_confirm_unknown_intent() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/api/payment-intent/confirm")
        .json(&json!({ "paymentIntentId": "pi_unknown" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(&response), "Transaction not found");
}

#[tokio::test]
async fn test_transactions_requires_auth() {
    let app = spawn_app().await;

    let response = app.server.get("/api/transactions").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&response), "Unauthorized");

    let response = app
        .server
        .get("/api/transactions")
        .authorization_bearer("not-a-jwt")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_transactions_history() {
    let app = spawn_app().await;
    create_deposit(&app, "user-1").await;
    create_deposit(&app, "user-1").await;
    create_deposit(&app, "user-2").await;

    let response = app
        .server
        .get("/api/transactions")
        .authorization_bearer(token_for("user-1"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    for tx in transactions {
        assert_eq!(tx["user_id"], "user-1");
        assert_eq!(tx["status"], "pending");
        assert_eq!(tx["properties"]["title"], "Lekki Phase 1 Terrace");
        assert_eq!(tx["properties"]["city"], "Lagos");
    }
}

#[tokio::test]
async fn test_transactions_pagination() {
    let app = spawn_app().await;
    for _ in 0..3 {
        create_deposit(&app, "user-1").await;
    }

    let response = app
        .server
        .get("/api/transactions")
        .add_query_param("limit", 2)
        .add_query_param("offset", 2)
        .authorization_bearer(token_for("user-1"))
        .await;
    let body: Value = response.json();
    assert_eq!(body["total"], 3);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);

    let response = app
        .server
        .get("/api/transactions")
        .add_query_param("limit", "ten")
        .authorization_bearer(token_for("user-1"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), "Invalid limit parameter");
}
