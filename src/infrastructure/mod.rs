//! Adapters for the domain ports: storage backends and payment providers.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod simulated;
pub mod stripe;
