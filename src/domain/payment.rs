use crate::domain::money::{Amount, Currency};
use crate::domain::pricing::{PriceCatalog, TierPrice};
use crate::domain::property::PropertySummary;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key/value pairs forwarded to the payment provider and kept on the ledger.
pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Deposit,
    Subscription,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw body of a payment-intent request, exactly as the checkout pages send it.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub r#type: Option<String>,
    pub property_id: Option<String>,
    pub user_id: Option<String>,
    pub tier: Option<String>,
}

/// What a request asks for once its fields have been checked.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOrder {
    Deposit {
        user_id: String,
        property_id: String,
    },
    Subscription {
        user_id: String,
        tier: TierPrice,
        property_id: Option<String>,
    },
}

/// Treats empty strings the same as absent fields.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

impl PaymentRequest {
    /// Checks the request fields in order; the first failure wins.
    ///
    /// Property existence is not checked here because it needs the store.
    pub fn into_order(self, catalog: &PriceCatalog) -> Result<PaymentOrder> {
        let (Some(kind), Some(user_id)) = (present(&self.r#type), present(&self.user_id)) else {
            return Err(PaymentError::validation("Missing required fields"));
        };
        let user_id = user_id.to_string();

        match kind {
            "deposit" => {
                let property_id = present(&self.property_id).ok_or_else(|| {
                    PaymentError::validation("Property ID required for deposits")
                })?;
                Ok(PaymentOrder::Deposit {
                    user_id,
                    property_id: property_id.to_string(),
                })
            }
            "subscription" => {
                let tier = present(&self.tier)
                    .and_then(|name| catalog.tier(name))
                    .ok_or_else(|| PaymentError::validation("Invalid subscription tier"))?;
                Ok(PaymentOrder::Subscription {
                    user_id,
                    tier: tier.clone(),
                    property_id: present(&self.property_id).map(str::to_string),
                })
            }
            _ => Err(PaymentError::validation("Invalid payment type")),
        }
    }
}

/// A fully priced payment, ready to be sent to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPlan {
    pub payment_type: PaymentType,
    pub user_id: String,
    pub property_id: Option<String>,
    pub amount: Amount,
    pub currency: Currency,
    pub description: String,
    pub metadata: Metadata,
}

fn base_metadata(user_id: &str, payment_type: PaymentType) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("user_id".to_string(), user_id.to_string());
    metadata.insert("type".to_string(), payment_type.to_string());
    metadata
}

impl PaymentPlan {
    /// Prices a reservation deposit for a property that is known to exist.
    pub fn deposit(user_id: String, property: &PropertySummary, catalog: &PriceCatalog) -> Self {
        let mut metadata = base_metadata(&user_id, PaymentType::Deposit);
        metadata.insert("property_id".to_string(), property.id.clone());

        Self {
            payment_type: PaymentType::Deposit,
            user_id,
            property_id: Some(property.id.clone()),
            amount: catalog.deposit(),
            currency: Currency::Ngn,
            description: format!("Reservation deposit for: {}", property.title),
            metadata,
        }
    }

    /// Prices a listing promotion. The property is optional and unchecked.
    pub fn subscription(user_id: String, tier: &TierPrice, property_id: Option<String>) -> Self {
        let mut metadata = base_metadata(&user_id, PaymentType::Subscription);
        metadata.insert("tier".to_string(), tier.tier.to_string());
        if let Some(property_id) = &property_id {
            metadata.insert("property_id".to_string(), property_id.clone());
        }

        Self {
            payment_type: PaymentType::Subscription,
            user_id,
            property_id,
            amount: tier.amount,
            currency: Currency::Ngn,
            description: format!("{} - Promoted Listing", tier.name),
            metadata,
        }
    }
}
