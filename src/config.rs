//! Command line and environment configuration.

use crate::error::{PaymentError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;

/// Minimum JWT secret length accepted for verifying sessions (256 bits).
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Parser)]
#[command(author, version, about = "Deposit and listing-promotion payments for the marketplace")]
pub struct Cli {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Use JSON log format
    #[arg(long, global = true, env = "JSON_LOGS", default_value = "false")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the payments HTTP API
    Serve(ServeArgs),
    /// Write a user's ledger as CSV to stdout
    Export(ExportArgs),
    /// Print deposit and promotion prices as CSV
    Pricing(PricingArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Stripe Payment Intents API
    Stripe,
    /// In-process provider for local development
    Simulated,
}

#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "ESTATE_PAY_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Property summaries CSV (id,title,price,address,city,images) loaded at startup
    #[arg(long, env = "ESTATE_PAY_PROPERTIES")]
    pub properties: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct PricingArgs {
    /// Reservation deposit in naira
    #[arg(long, env = "ESTATE_PAY_DEPOSIT_AMOUNT", default_value = "50000")]
    pub deposit_amount: Decimal,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Server address
    #[arg(long, env = "ESTATE_PAY_ADDRESS", default_value = "0.0.0.0:8080")]
    pub address: String,

    /// CORS allowed origins (comma-separated, or "*" for any)
    #[arg(long, env = "CORS_ALLOW_ORIGINS")]
    pub cors_allow_origins: Option<String>,

    /// Payment provider backend
    #[arg(long, env = "ESTATE_PAY_PROVIDER", value_enum, default_value = "stripe")]
    pub provider: ProviderKind,

    /// Stripe secret key, required with the stripe provider
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<SecretString>,

    /// Stripe API origin
    #[arg(long, env = "STRIPE_API_URL", default_value = crate::infrastructure::stripe::STRIPE_API_URL)]
    pub stripe_api_url: String,

    /// Secret used to verify session access tokens (min 32 chars)
    #[arg(long, env = "SUPABASE_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: SecretString,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub pricing: PricingArgs,
}

impl ServeArgs {
    /// Checks values clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.expose_secret().len() < MIN_JWT_SECRET_LEN {
            return Err(PaymentError::ConfigError(format!(
                "JWT secret must be at least {MIN_JWT_SECRET_LEN} characters"
            )));
        }
        if self.provider == ProviderKind::Stripe && self.stripe_secret_key.is_none() {
            return Err(PaymentError::ConfigError(
                "STRIPE_SECRET_KEY is required with the stripe provider".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// User whose transactions are exported
    #[arg(long)]
    pub user: String,

    /// Maximum number of records
    #[arg(long, default_value = "100")]
    pub limit: usize,

    #[command(flatten)]
    pub storage: StorageArgs,
}
