use crate::domain::ports::{Page, PropertyStore, TransactionStore};
use crate::domain::property::PropertySummary;
use crate::domain::transaction::TransactionRecord;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for property summaries, keyed by property id.
pub const CF_PROPERTIES: &str = "properties";
/// Column Family for ledger records, keyed by record UUID bytes.
pub const CF_TRANSACTIONS: &str = "transactions";
/// Column Family mapping payment intent ids to record UUID bytes.
pub const CF_TRANSACTIONS_BY_INTENT: &str = "transactions_by_intent";
/// Column Family indexing ledger records per user, keyed
/// `user_id \0 created_at id` so a reverse scan yields newest first.
pub const CF_TRANSACTIONS_BY_USER: &str = "transactions_by_user";

fn user_prefix(user_id: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(user_id.len() + 1);
    prefix.extend_from_slice(user_id.as_bytes());
    prefix.push(0);
    prefix
}

fn user_index_key(record: &TransactionRecord) -> Vec<u8> {
    let mut key = user_prefix(&record.user_id);
    // Flipping the sign bit keeps big-endian byte order equal to time order.
    let micros = (record.created_at.timestamp_micros() as u64) ^ (1 << 63);
    key.extend_from_slice(&micros.to_be_bytes());
    key.extend_from_slice(record.id.as_bytes());
    key
}

/// A persistent store implementation using RocksDB.
///
/// Properties and ledger records live in separate Column Families, values
/// are JSON. This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = [
            CF_PROPERTIES,
            CF_TRANSACTIONS,
            CF_TRANSACTIONS_BY_INTENT,
            CF_TRANSACTIONS_BY_USER,
        ]
        .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(format!(
                "Column family {name} not found"
            ))))
        })
    }

    fn get_record(&self, key: &[u8]) -> Result<Option<TransactionRecord>> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        match self.db.get_pinned_cf(cf, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PropertyStore for RocksDBStore {
    async fn store(&self, property: PropertySummary) -> Result<()> {
        let cf = self.cf(CF_PROPERTIES)?;
        let value = serde_json::to_vec(&property)?;
        self.db.put_cf(cf, property.id.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, property_id: &str) -> Result<Option<PropertySummary>> {
        let cf = self.cf(CF_PROPERTIES)?;
        match self.db.get_pinned_cf(cf, property_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn store(&self, record: TransactionRecord) -> Result<()> {
        let records = self.cf(CF_TRANSACTIONS)?;
        let by_intent = self.cf(CF_TRANSACTIONS_BY_INTENT)?;
        let by_user = self.cf(CF_TRANSACTIONS_BY_USER)?;

        let key = record.id.as_bytes().to_vec();
        let value = serde_json::to_vec(&record)?;

        let mut batch = rocksdb::WriteBatch::default();
        batch.put_cf(records, &key, value);
        batch.put_cf(
            by_intent,
            record.provider_payment_intent_id.as_bytes(),
            &key,
        );
        batch.put_cf(by_user, user_index_key(&record), &key);
        self.db.write(batch)?;

        Ok(())
    }

    async fn get_by_intent(&self, payment_intent_id: &str) -> Result<Option<TransactionRecord>> {
        let by_intent = self.cf(CF_TRANSACTIONS_BY_INTENT)?;
        match self.db.get_cf(by_intent, payment_intent_id.as_bytes())? {
            Some(key) => self.get_record(&key),
            None => Ok(None),
        }
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<(Vec<TransactionRecord>, usize)> {
        let by_user = self.cf(CF_TRANSACTIONS_BY_USER)?;
        let prefix = user_prefix(user_id);
        let upper = [user_id.as_bytes(), &[1]].concat();

        let mut total = 0;
        let mut records = Vec::new();
        let scan = self
            .db
            .iterator_cf(by_user, IteratorMode::From(&upper, Direction::Reverse));
        for item in scan {
            let (index_key, record_key) = item?;
            if !index_key.starts_with(&prefix) {
                break;
            }
            if total >= page.offset && records.len() < page.limit {
                if let Some(record) = self.get_record(&record_key)? {
                    records.push(record);
                }
            }
            total += 1;
        }

        Ok((records, total))
    }
}
