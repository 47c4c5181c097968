//! CSV adapters: property seeding and ledger export.

pub mod price_writer;
pub mod property_reader;
pub mod transaction_writer;
