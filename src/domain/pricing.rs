use crate::domain::money::Amount;
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reservation deposit charged for a property, in naira.
pub const DEPOSIT_AMOUNT: Decimal = dec!(50000);

/// Listing-promotion tiers, from cheapest to most visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Basic,
    Pro,
    Premium,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [Self::Basic, Self::Pro, Self::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Boost",
            Self::Pro => "Pro Boost",
            Self::Premium => "Premium Boost",
        }
    }

    fn default_price(&self) -> Decimal {
        match self {
            Self::Basic => dec!(5000),
            Self::Pro => dec!(15000),
            Self::Premium => dec!(30000),
        }
    }

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["7 days featured placement", "Highlighted listing card"],
            Self::Pro => &[
                "30 days featured placement",
                "Top of search results",
                "Highlighted listing card",
            ],
            Self::Premium => &[
                "90 days featured placement",
                "Homepage spotlight",
                "Top of search results",
                "Priority support",
            ],
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            "premium" => Ok(Self::Premium),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced tier as shown on the promotion page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierPrice {
    pub tier: SubscriptionTier,
    pub name: &'static str,
    pub amount: Amount,
    pub features: &'static [&'static str],
}

/// Business prices for everything the marketplace charges for.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCatalog {
    deposit: Amount,
    tiers: Vec<TierPrice>,
}

impl PriceCatalog {
    /// Builds the catalog with a custom deposit and the standard tier prices.
    pub fn with_deposit(deposit: Decimal) -> Result<Self> {
        Ok(Self {
            deposit: Amount::new(deposit)?,
            ..Self::default()
        })
    }

    pub fn deposit(&self) -> Amount {
        self.deposit
    }

    /// Looks up a tier by its wire name. Unknown names resolve to `None`.
    pub fn tier(&self, name: &str) -> Option<&TierPrice> {
        let tier = SubscriptionTier::from_str(name).ok()?;
        self.tiers.iter().find(|price| price.tier == tier)
    }

    pub fn tiers(&self) -> &[TierPrice] {
        &self.tiers
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        let tiers = SubscriptionTier::ALL
            .iter()
            .map(|tier| TierPrice {
                tier: *tier,
                name: tier.display_name(),
                amount: Amount::from_constant(tier.default_price()),
                features: tier.features(),
            })
            .collect();

        Self {
            deposit: Amount::from_constant(DEPOSIT_AMOUNT),
            tiers,
        }
    }
}
