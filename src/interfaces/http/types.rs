//! Request and response bodies of the HTTP API.

use crate::domain::money::{Amount, Currency};
use crate::domain::pricing::{PriceCatalog, SubscriptionTier};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub payment_intent_id: Option<String>,
}

/// Pagination parameters are kept as text so that garbage can be rejected
/// with a readable message instead of the extractor's default.
#[derive(Debug, Deserialize, Default)]
pub struct TransactionsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TierResponse {
    pub tier: SubscriptionTier,
    pub name: String,
    pub amount: Amount,
    /// Price in minor units, the unit the payment form displays from.
    pub amount_minor: i64,
    pub features: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PricingResponse {
    pub currency: String,
    pub deposit: Amount,
    pub deposit_minor: i64,
    pub tiers: Vec<TierResponse>,
}

impl PricingResponse {
    pub fn from_catalog(catalog: &PriceCatalog) -> Result<Self> {
        let tiers = catalog
            .tiers()
            .iter()
            .map(|price| {
                Ok(TierResponse {
                    tier: price.tier,
                    name: price.name.to_string(),
                    amount: price.amount,
                    amount_minor: price.amount.minor_units()?,
                    features: price.features.iter().map(|f| f.to_string()).collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            currency: Currency::Ngn.to_string(),
            deposit: catalog.deposit(),
            deposit_minor: catalog.deposit().minor_units()?,
            tiers,
        })
    }
}
