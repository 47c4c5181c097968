use super::intent::{CreateIntent, PaymentIntent};
use super::property::PropertySummary;
use super::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;

/// A window into a user's history: skip `offset` records, return at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn store(&self, property: PropertySummary) -> Result<()>;
    async fn get(&self, property_id: &str) -> Result<Option<PropertySummary>>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts or replaces the record with the same id.
    async fn store(&self, record: TransactionRecord) -> Result<()>;
    async fn get_by_intent(&self, payment_intent_id: &str) -> Result<Option<TransactionRecord>>;
    /// Returns one page of a user's records, newest first, and the user's total count.
    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<(Vec<TransactionRecord>, usize)>;
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_intent(&self, params: CreateIntent) -> Result<PaymentIntent>;
    async fn retrieve_intent(&self, payment_intent_id: &str) -> Result<PaymentIntent>;
}

pub type PropertyStoreBox = Box<dyn PropertyStore>;
pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type PaymentProviderBox = Box<dyn PaymentProvider>;
