use crate::domain::intent::{CreateIntent, IntentStatus, PaymentIntent};
use crate::domain::ports::PaymentProvider;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// An in-process payment provider.
///
/// Intents are numbered `pi_sim_<n>` and start out needing a payment method,
/// like real ones. Tests and local development move them along with
/// [`SimulatedProvider::set_status`].
#[derive(Default, Clone)]
pub struct SimulatedProvider {
    intents: Arc<RwLock<HashMap<String, PaymentIntent>>>,
    next_id: Arc<AtomicU64>,
    /// When set, every call fails with this message.
    outage: Arc<RwLock<Option<String>>>,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves an existing intent to `status`. A `failed_attempt` records a
    /// payment error on the intent, as a declined card would.
    pub async fn set_status(
        &self,
        payment_intent_id: &str,
        status: IntentStatus,
        failed_attempt: bool,
    ) -> Result<()> {
        let mut intents = self.intents.write().await;
        let intent = intents
            .get_mut(payment_intent_id)
            .ok_or_else(|| PaymentError::not_found("Payment intent not found"))?;
        intent.status = status;
        intent.last_payment_error =
            failed_attempt.then(|| serde_json::json!({ "code": "card_declined" }));
        Ok(())
    }

    /// Makes every subsequent call fail, or heals the provider with `None`.
    pub async fn set_outage(&self, message: Option<&str>) {
        *self.outage.write().await = message.map(str::to_string);
    }

    async fn check_outage(&self) -> Result<()> {
        match self.outage.read().await.as_ref() {
            Some(message) => Err(PaymentError::ProviderError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentProvider for SimulatedProvider {
    async fn create_intent(&self, params: CreateIntent) -> Result<PaymentIntent> {
        self.check_outage().await?;
        if params.amount <= 0 {
            return Err(PaymentError::ProviderError(
                "Amount must be at least 1".to_string(),
            ));
        }

        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("pi_sim_{n}");
        let intent = PaymentIntent {
            client_secret: Some(format!("{id}_secret_{n}")),
            id: id.clone(),
            amount: params.amount,
            currency: params.currency,
            status: IntentStatus::RequiresPaymentMethod,
            metadata: params.metadata,
            last_payment_error: None,
        };

        self.intents.write().await.insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, payment_intent_id: &str) -> Result<PaymentIntent> {
        self.check_outage().await?;
        self.intents
            .read()
            .await
            .get(payment_intent_id)
            .cloned()
            .ok_or_else(|| {
                PaymentError::ProviderError(format!("No such payment_intent: '{payment_intent_id}'"))
            })
    }
}
