use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransactionRow<'a> {
    id: String,
    created_at: String,
    r#type: &'a str,
    status: &'a str,
    amount: String,
    currency: &'a str,
    property_id: &'a str,
    provider_payment_intent_id: &'a str,
    description: &'a str,
}

impl<'a> From<&'a TransactionRecord> for TransactionRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            created_at: record.created_at.to_rfc3339(),
            r#type: record.r#type.as_str(),
            status: record.status.as_str(),
            amount: record.amount.to_string(),
            currency: record.currency.code(),
            property_id: record.property_id.as_deref().unwrap_or_default(),
            provider_payment_intent_id: &record.provider_payment_intent_id,
            description: &record.description,
        }
    }
}

const HEADER: [&str; 9] = [
    "id",
    "created_at",
    "type",
    "status",
    "amount",
    "currency",
    "property_id",
    "provider_payment_intent_id",
    "description",
];

/// Writes ledger records as CSV, one row per record, header first.
pub struct TransactionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_transactions<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a TransactionRecord>,
    ) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for record in records {
            self.writer.serialize(TransactionRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
