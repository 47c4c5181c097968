use crate::domain::intent::CreateIntent;
use crate::domain::payment::{PaymentOrder, PaymentPlan, PaymentRequest};
use crate::domain::ports::{Page, PaymentProviderBox, PropertyStoreBox, TransactionStoreBox};
use crate::domain::pricing::PriceCatalog;
use crate::domain::property::PropertySummary;
use crate::domain::transaction::TransactionRecord;
use crate::error::{PaymentError, Result};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: usize = 100;

/// What the checkout pages need to mount the provider's payment form.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentCreated {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    /// Amount in minor units, as charged by the provider.
    pub amount: i64,
}

/// A ledger record with the property it refers to, if any.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct TransactionView {
    #[serde(flatten)]
    pub record: TransactionRecord,
    pub properties: Option<PropertySummary>,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct TransactionPage {
    pub transactions: Vec<TransactionView>,
    pub total: usize,
}

/// Orchestrates the payment flow: pricing, the provider call and the ledger.
///
/// The provider is the source of truth for money movement; the ledger is the
/// marketplace's bookkeeping of it.
pub struct PaymentService {
    properties: PropertyStoreBox,
    transactions: TransactionStoreBox,
    provider: PaymentProviderBox,
    catalog: PriceCatalog,
}

impl PaymentService {
    pub fn new(
        properties: PropertyStoreBox,
        transactions: TransactionStoreBox,
        provider: PaymentProviderBox,
        catalog: PriceCatalog,
    ) -> Self {
        Self {
            properties,
            transactions,
            provider,
            catalog,
        }
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// Prices the request, opens a provider intent and books it as pending.
    ///
    /// A failed ledger write is logged and swallowed: the intent already
    /// exists and the customer must still be able to pay.
    #[instrument(skip(self, request))]
    pub async fn create_payment_intent(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentIntentCreated> {
        let plan = self.plan(request).await?;

        let intent = self
            .provider
            .create_intent(CreateIntent {
                amount: plan.amount.minor_units()?,
                currency: plan.currency,
                description: plan.description.clone(),
                metadata: plan.metadata.clone(),
                automatic_payment_methods: true,
            })
            .await?;

        let record = TransactionRecord::pending(&plan, intent.id.clone());
        if let Err(e) = self.transactions.store(record).await {
            error!(error = %e, payment_intent_id = %intent.id, "Transaction insert error");
        }

        info!(
            payment_intent_id = %intent.id,
            user_id = %plan.user_id,
            payment_type = %plan.payment_type,
            amount = intent.amount,
            "Payment intent created"
        );

        Ok(PaymentIntentCreated {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
            amount: intent.amount,
        })
    }

    async fn plan(&self, request: PaymentRequest) -> Result<PaymentPlan> {
        match request.into_order(&self.catalog)? {
            PaymentOrder::Deposit {
                user_id,
                property_id,
            } => {
                let property = self
                    .properties
                    .get(&property_id)
                    .await?
                    .ok_or_else(|| PaymentError::not_found("Property not found"))?;
                Ok(PaymentPlan::deposit(user_id, &property, &self.catalog))
            }
            PaymentOrder::Subscription {
                user_id,
                tier,
                property_id,
            } => Ok(PaymentPlan::subscription(user_id, &tier, property_id)),
        }
    }

    /// Settles the ledger record of an intent with the provider's verdict.
    ///
    /// Safe to call repeatedly; a record already in the reported status is
    /// returned unchanged.
    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, payment_intent_id: &str) -> Result<TransactionRecord> {
        if payment_intent_id.is_empty() {
            return Err(PaymentError::validation("Payment intent ID required"));
        }

        let mut record = self
            .transactions
            .get_by_intent(payment_intent_id)
            .await?
            .ok_or_else(|| PaymentError::not_found("Transaction not found"))?;
        let intent = self.provider.retrieve_intent(payment_intent_id).await?;

        let status = intent.ledger_status();
        if record.transition(status)? {
            self.transactions.store(record.clone()).await?;
            info!(%payment_intent_id, %status, "Transaction settled");
        } else if !record.status.is_terminal() {
            warn!(%payment_intent_id, provider_status = ?intent.status, "Payment not settled yet");
        }

        Ok(record)
    }

    /// Returns one page of a user's history, newest first, with property cards.
    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        user_id: &str,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<TransactionPage> {
        let page = Page {
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        };

        let (records, total) = self.transactions.list_for_user(user_id, page).await?;

        let mut transactions = Vec::with_capacity(records.len());
        for record in records {
            let properties = match &record.property_id {
                Some(id) => self.properties.get(id).await?,
                None => None,
            };
            transactions.push(TransactionView { record, properties });
        }

        Ok(TransactionPage {
            transactions,
            total,
        })
    }
}
