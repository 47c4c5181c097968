use crate::domain::money::Currency;
use crate::domain::payment::Metadata;
use crate::domain::transaction::TransactionStatus;
use serde::{Deserialize, Serialize};

/// Lifecycle of a payment intent on the provider side.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
}

impl IntentStatus {
    /// The ledger status an intent in this state settles a record to.
    ///
    /// `attempted` tells whether the customer already tried to pay; an intent
    /// that is back to needing a payment method after an attempt has failed,
    /// though the customer may still retry on it.
    pub fn ledger_status(&self, attempted: bool) -> TransactionStatus {
        match self {
            Self::Succeeded => TransactionStatus::Completed,
            Self::Canceled => TransactionStatus::Canceled,
            Self::RequiresPaymentMethod if attempted => TransactionStatus::Failed,
            _ => TransactionStatus::Pending,
        }
    }
}

/// Parameters for creating a payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntent {
    /// Amount in minor units.
    pub amount: i64,
    pub currency: Currency,
    pub description: String,
    pub metadata: Metadata,
    pub automatic_payment_methods: bool,
}

/// A payment intent as the provider reports it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    /// Amount in minor units.
    pub amount: i64,
    pub currency: Currency,
    pub status: IntentStatus,
    #[serde(default)]
    pub metadata: Metadata,
    /// Set when the most recent payment attempt failed.
    #[serde(default)]
    pub last_payment_error: Option<serde_json::Value>,
}

impl PaymentIntent {
    pub fn ledger_status(&self) -> TransactionStatus {
        self.status.ledger_status(self.last_payment_error.is_some())
    }
}
