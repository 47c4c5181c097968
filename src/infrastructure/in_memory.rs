use crate::domain::ports::{Page, PropertyStore, TransactionStore};
use crate::domain::property::PropertySummary;
use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for property summaries.
///
/// Ideal for development and tests, usually seeded from a CSV file.
#[derive(Default, Clone)]
pub struct InMemoryPropertyStore {
    properties: Arc<RwLock<HashMap<String, PropertySummary>>>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn store(&self, property: PropertySummary) -> Result<()> {
        let mut properties = self.properties.write().await;
        properties.insert(property.id.clone(), property);
        Ok(())
    }

    async fn get(&self, property_id: &str) -> Result<Option<PropertySummary>> {
        let properties = self.properties.read().await;
        Ok(properties.get(property_id).cloned())
    }
}

#[derive(Default)]
struct Ledger {
    records: HashMap<Uuid, TransactionRecord>,
    by_intent: HashMap<String, Uuid>,
}

/// A thread-safe in-memory transaction ledger.
///
/// Keeps a secondary index from payment intent id to record id so that
/// confirmations do not scan the whole ledger.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn store(&self, record: TransactionRecord) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger
            .by_intent
            .insert(record.provider_payment_intent_id.clone(), record.id);
        ledger.records.insert(record.id, record);
        Ok(())
    }

    async fn get_by_intent(&self, payment_intent_id: &str) -> Result<Option<TransactionRecord>> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .by_intent
            .get(payment_intent_id)
            .and_then(|id| ledger.records.get(id))
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<(Vec<TransactionRecord>, usize)> {
        let ledger = self.ledger.read().await;
        let mut records: Vec<&TransactionRecord> = ledger
            .records
            .values()
            .filter(|record| record.user_id == user_id)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = records.len();
        let page = records
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
