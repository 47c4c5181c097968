//! Stripe Payment Intents client over the REST API.
//!
//! Only the two calls the checkout flow needs are implemented:
//! `POST /v1/payment_intents` and `GET /v1/payment_intents/{id}`.

use crate::domain::intent::{CreateIntent, PaymentIntent};
use crate::domain::ports::PaymentProvider;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default Stripe API origin.
pub const STRIPE_API_URL: &str = "https://api.stripe.com";

/// Requests to the provider give up after this long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    r#type: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    base_url: String,
    secret_key: SecretString,
}

impl StripeClient {
    pub fn new(secret_key: SecretString) -> Result<Self> {
        Self::with_base_url(secret_key, STRIPE_API_URL)
    }

    /// Points the client at another origin, e.g. a local Stripe mock.
    pub fn with_base_url(secret_key: SecretString, base_url: impl Into<String>) -> Result<Self> {
        if secret_key.expose_secret().is_empty() {
            return Err(PaymentError::ConfigError(
                "Stripe secret key is empty".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PaymentError::InternalError(Box::new(e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response(&self, resp: reqwest::Response) -> Result<PaymentIntent> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<PaymentIntent>()
                .await
                .map_err(|e| PaymentError::ProviderError(format!("Invalid response: {e}")));
        }

        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error: detail }) => detail
                .message
                .or(detail.r#type)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        error!(status = status.as_u16(), %message, "Stripe request failed");
        Err(PaymentError::ProviderError(message))
    }
}

/// Flattens intent parameters into Stripe's bracketed form encoding.
pub fn encode_create_intent(params: &CreateIntent) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), params.amount.to_string()),
        ("currency".to_string(), params.currency.code().to_string()),
        ("description".to_string(), params.description.clone()),
    ];
    if params.automatic_payment_methods {
        form.push((
            "automatic_payment_methods[enabled]".to_string(),
            "true".to_string(),
        ));
    }
    for (key, value) in &params.metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    async fn create_intent(&self, params: CreateIntent) -> Result<PaymentIntent> {
        let form = encode_create_intent(&params);
        let resp = self
            .http
            .post(self.url("/v1/payment_intents"))
            .bearer_auth(self.secret_key.expose_secret())
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::ProviderError(e.to_string()))?;

        let intent = self.handle_response(resp).await?;
        debug!(payment_intent_id = %intent.id, "Created payment intent");
        Ok(intent)
    }

    #[instrument(skip(self))]
    async fn retrieve_intent(&self, payment_intent_id: &str) -> Result<PaymentIntent> {
        let resp = self
            .http
            .get(self.url(&format!("/v1/payment_intents/{payment_intent_id}")))
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| PaymentError::ProviderError(e.to_string()))?;

        self.handle_response(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Currency;
    use crate::domain::payment::Metadata;

    #[test]
    fn test_encode_create_intent() {
        let mut metadata = Metadata::new();
        metadata.insert("user_id".to_string(), "u1".to_string());
        metadata.insert("tier".to_string(), "pro".to_string());

        let form = encode_create_intent(&CreateIntent {
            amount: 1_500_000,
            currency: Currency::Ngn,
            description: "Pro Boost - Promoted Listing".to_string(),
            metadata,
            automatic_payment_methods: true,
        });

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("amount"), Some("1500000"));
        assert_eq!(get("currency"), Some("ngn"));
        assert_eq!(get("automatic_payment_methods[enabled]"), Some("true"));
        assert_eq!(get("metadata[user_id]"), Some("u1"));
        assert_eq!(get("metadata[tier]"), Some("pro"));
    }

    #[test]
    fn test_empty_secret_key_is_rejected() {
        let result = StripeClient::new(SecretString::from(String::new()));
        assert!(matches!(result, Err(PaymentError::ConfigError(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            StripeClient::with_base_url(SecretString::from("sk_test_123".to_string()), "http://localhost:12111/")
                .unwrap();
        assert_eq!(
            client.url("/v1/payment_intents"),
            "http://localhost:12111/v1/payment_intents"
        );
    }
}
