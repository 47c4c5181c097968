//! # HTTP API Module
//!
//! ## Endpoints
//!
//! - `POST /api/payment-intent` - Price a deposit or promotion and open a payment intent
//! - `POST /api/payment-intent/confirm` - Settle the ledger record of a paid intent
//! - `GET /api/transactions` - The signed-in user's payment history
//! - `GET /api/pricing` - Deposit and promotion prices
//! - `GET /health` - Health check

mod error;
mod handlers;
mod types;

pub use handlers::{
    confirm_payment_handler, create_payment_intent_handler, health_handler, pricing_handler,
    transactions_handler,
};
pub use types::{
    ConfirmRequest, ErrorResponse, HealthResponse, PricingResponse, TierResponse,
    TransactionsQuery,
};

use crate::application::payments::PaymentService;
use crate::interfaces::auth::SessionVerifier;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PaymentService>,
    pub sessions: SessionVerifier,
}

impl AppState {
    pub fn new(service: PaymentService, sessions: SessionVerifier) -> Self {
        Self {
            service: Arc::new(service),
            sessions,
        }
    }
}

/// Build the CORS layer from a comma-separated origin list.
///
/// `*` allows every origin; no list restricts the API to local frontends.
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match origins.map(str::trim) {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins");
            CorsLayer::permissive()
        }
        Some(list) if !list.is_empty() => {
            let allowed: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|origin| {
                    let origin = origin.trim();
                    match origin.parse::<HeaderValue>() {
                        Ok(value) => Some(value),
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                            None
                        }
                    }
                })
                .collect();
            base.allow_origin(allowed)
        }
        _ => {
            let localhost: Vec<HeaderValue> = ["http://localhost:3000", "http://127.0.0.1:3000"]
                .into_iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            base.allow_origin(localhost)
        }
    }
}

/// Create the axum router with all endpoints and middleware.
pub fn create_router(state: AppState, cors_origins: Option<&str>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/pricing", get(handlers::pricing_handler))
        .route(
            "/api/payment-intent",
            post(handlers::create_payment_intent_handler),
        )
        .route(
            "/api/payment-intent/confirm",
            post(handlers::confirm_payment_handler),
        )
        .route("/api/transactions", get(handlers::transactions_handler))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(build_cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
