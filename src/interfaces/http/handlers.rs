//! # API Endpoint Handlers

use super::AppState;
use super::types::{ConfirmRequest, HealthResponse, PricingResponse, TransactionsQuery};
use crate::application::payments::{PaymentIntentCreated, TransactionPage};
use crate::domain::payment::PaymentRequest;
use crate::domain::transaction::TransactionRecord;
use crate::error::{PaymentError, Result};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use tracing::debug;

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        PaymentError::validation("Invalid JSON body")
    })
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<usize>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| PaymentError::validation(format!("Invalid {name} parameter"))),
    }
}

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Prices shown on the checkout and promotion pages.
pub async fn pricing_handler(State(state): State<AppState>) -> Result<Json<PricingResponse>> {
    Ok(Json(PricingResponse::from_catalog(state.service.catalog())?))
}

/// `POST /api/payment-intent`
pub async fn create_payment_intent_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntentCreated>> {
    let request = json_body(body)?;
    let created = state.service.create_payment_intent(request).await?;
    Ok(Json(created))
}

/// `POST /api/payment-intent/confirm`
pub async fn confirm_payment_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<TransactionRecord>> {
    let request = json_body(body)?;
    let payment_intent_id = request.payment_intent_id.unwrap_or_default();
    let record = state.service.confirm_payment(&payment_intent_id).await?;
    Ok(Json(record))
}

/// `GET /api/transactions`
///
/// The caller is resolved from the bearer token before anything else is read.
pub async fn transactions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: std::result::Result<Query<TransactionsQuery>, QueryRejection>,
) -> Result<Json<TransactionPage>> {
    let user_id = state.sessions.verify_headers(&headers)?;

    let Query(query) =
        query.map_err(|_| PaymentError::validation("Invalid query parameters"))?;
    let limit = parse_param("limit", query.limit.as_deref())?;
    let offset = parse_param("offset", query.offset.as_deref())?;

    let page = state
        .service
        .list_transactions(&user_id, limit, offset)
        .await?;
    Ok(Json(page))
}
