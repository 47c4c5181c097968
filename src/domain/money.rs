use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of minor units (kobo) in one major unit (naira).
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Represents a strictly positive monetary amount in major currency units.
///
/// This is a wrapper around `rust_decimal::Decimal` so that an amount handed to
/// the payment provider can never be zero, negative or carry sub-kobo precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::validation("Amount must be positive"));
        }
        if value.normalize().scale() > 2 {
            return Err(PaymentError::validation(
                "Amount cannot have more than two decimal places",
            ));
        }
        Ok(Self(value))
    }

    /// Wraps a compile-time constant price. The value must be positive with at
    /// most two decimal places.
    pub(crate) const fn from_constant(value: Decimal) -> Self {
        Self(value)
    }

    /// Builds an amount from an integer number of minor units.
    pub fn from_minor_units(units: i64) -> Result<Self> {
        Self::new(Decimal::new(units, 2))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Integer minor units, the representation payment providers expect.
    pub fn minor_units(&self) -> Result<i64> {
        (self.0 * Decimal::from(MINOR_UNITS_PER_MAJOR))
            .to_i64()
            .ok_or_else(|| PaymentError::validation("Amount is too large"))
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Settlement currency. The marketplace only trades in naira.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Ngn,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ngn => "ngn",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
