use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The slice of a listing that the payment flow needs: the title for
/// descriptions and the card fields joined into transaction history.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PropertySummary {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
}
