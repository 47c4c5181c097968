//! Wiring: storage selection, provider selection and the entry points the
//! binary's subcommands run.

use crate::application::payments::PaymentService;
use crate::config::{ExportArgs, PricingArgs, ProviderKind, ServeArgs, StorageArgs};
use crate::domain::ports::{
    Page, PaymentProviderBox, PropertyStore, PropertyStoreBox, TransactionStoreBox,
};
use crate::domain::pricing::PriceCatalog;
use crate::error::{PaymentError, Result};
use crate::infrastructure::in_memory::{InMemoryPropertyStore, InMemoryTransactionStore};
use crate::infrastructure::simulated::SimulatedProvider;
use crate::infrastructure::stripe::StripeClient;
use crate::interfaces::auth::SessionVerifier;
use crate::interfaces::csv::price_writer::write_price_list;
use crate::interfaces::csv::property_reader::PropertyReader;
use crate::interfaces::csv::transaction_writer::TransactionWriter;
use crate::interfaces::http::{AppState, create_router};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{info, warn};

fn in_memory_stores() -> (PropertyStoreBox, TransactionStoreBox) {
    (
        Box::new(InMemoryPropertyStore::new()),
        Box::new(InMemoryTransactionStore::new()),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_persistent(db_path: &Path) -> Result<(PropertyStoreBox, TransactionStoreBox)> {
    let store = crate::infrastructure::rocksdb::RocksDBStore::open(db_path)?;
    info!(path = %db_path.display(), "Using RocksDB storage");
    Ok((Box::new(store.clone()), Box::new(store)))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_persistent(_db_path: &Path) -> Result<(PropertyStoreBox, TransactionStoreBox)> {
    warn!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(in_memory_stores())
}

/// Opens RocksDB when a path is given and the feature is enabled, memory otherwise.
pub fn open_stores(storage: &StorageArgs) -> Result<(PropertyStoreBox, TransactionStoreBox)> {
    match &storage.db_path {
        Some(db_path) => open_persistent(db_path),
        None => Ok(in_memory_stores()),
    }
}

/// Loads property summaries from CSV. Malformed rows are skipped.
pub async fn seed_properties(store: &dyn PropertyStore, path: &Path) -> Result<usize> {
    let file = File::open(path)?;
    let mut loaded = 0;
    for (line, result) in PropertyReader::new(file).properties().enumerate() {
        match result {
            Ok(property) => {
                store.store(property).await?;
                loaded += 1;
            }
            Err(e) => warn!(row = line + 1, error = %e, "Error reading property"),
        }
    }
    info!(loaded, path = %path.display(), "Seeded properties");
    Ok(loaded)
}

fn build_provider(args: &ServeArgs) -> Result<PaymentProviderBox> {
    match args.provider {
        ProviderKind::Stripe => {
            let key = args.stripe_secret_key.clone().ok_or_else(|| {
                PaymentError::ConfigError("STRIPE_SECRET_KEY is required".to_string())
            })?;
            Ok(Box::new(StripeClient::with_base_url(
                key,
                args.stripe_api_url.clone(),
            )?))
        }
        ProviderKind::Simulated => {
            warn!("Using the simulated payment provider; no real charges will be made");
            Ok(Box::new(SimulatedProvider::new()))
        }
    }
}

/// Builds the service and its state from configuration, seeding properties.
pub async fn build_state(args: &ServeArgs) -> Result<AppState> {
    args.validate()?;

    let (properties, transactions) = open_stores(&args.storage)?;
    if let Some(path) = &args.storage.properties {
        seed_properties(properties.as_ref(), path).await?;
    }

    let service = PaymentService::new(
        properties,
        transactions,
        build_provider(args)?,
        PriceCatalog::with_deposit(args.pricing.deposit_amount)?,
    );
    Ok(AppState::new(service, SessionVerifier::new(&args.jwt_secret)))
}

/// Runs the HTTP API until Ctrl-C.
pub async fn serve(args: ServeArgs) -> Result<()> {
    let state = build_state(&args).await?;
    let router = create_router(state, args.cors_allow_origins.as_deref());

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    info!(address = %args.address, provider = ?args.provider, "Payments API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

/// Writes a user's ledger as CSV to stdout, newest first.
pub async fn export(args: ExportArgs) -> Result<()> {
    let (_, transactions) = open_stores(&args.storage)?;
    let (records, total) = transactions
        .list_for_user(
            &args.user,
            Page {
                limit: args.limit,
                offset: 0,
            },
        )
        .await?;
    info!(user_id = %args.user, exported = records.len(), total, "Exporting transactions");

    let stdout = io::stdout();
    TransactionWriter::new(stdout.lock()).write_transactions(&records)
}

/// Writes the price list as CSV to stdout.
pub fn pricing(args: PricingArgs) -> Result<()> {
    let catalog = PriceCatalog::with_deposit(args.deposit_amount)?;
    let stdout = io::stdout();
    write_price_list(stdout.lock(), &catalog)
}
