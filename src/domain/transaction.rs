use crate::domain::money::{Amount, Currency};
use crate::domain::payment::{Metadata, PaymentPlan, PaymentType};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Canceled,
}

impl TransactionStatus {
    /// Completed and canceled records are settled for good. A failed
    /// record can still move on: the customer may retry on the same intent.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ledger entry: a payment the marketplace asked the provider to collect.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub user_id: String,
    pub property_id: Option<String>,
    pub r#type: PaymentType,
    pub provider_payment_intent_id: String,
    pub amount: Amount,
    pub currency: Currency,
    pub status: TransactionStatus,
    pub description: String,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Opens a pending record for a plan the provider has accepted.
    pub fn pending(plan: &PaymentPlan, payment_intent_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: plan.user_id.clone(),
            property_id: plan.property_id.clone(),
            r#type: plan.payment_type,
            provider_payment_intent_id: payment_intent_id.into(),
            amount: plan.amount,
            currency: plan.currency,
            status: TransactionStatus::Pending,
            description: plan.description.clone(),
            metadata: plan.metadata.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the record to `status`.
    ///
    /// Returns `Ok(false)` when nothing changed: the record already sits in
    /// that status, or it is settled and the target is `Pending`.
    /// Moving a settled record to a different settled status is rejected.
    pub fn transition(&mut self, status: TransactionStatus) -> Result<bool> {
        if status == self.status {
            return Ok(false);
        }
        if self.status.is_terminal() {
            if status == TransactionStatus::Pending {
                return Ok(false);
            }
            return Err(PaymentError::validation(format!(
                "Transaction already {}",
                self.status
            )));
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(true)
    }
}
