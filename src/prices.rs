//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places money is shown and submitted with.
const MONEY_DP: u32 = 2;

/// Errors raised when converting a backend amount into a [`Price`].
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount was NaN or infinite.
    #[error("price {0} is not a finite number")]
    NotFinite(f64),
}

/// Represents a price in major units, exactly as the catalog sent it.
///
/// Prices are kept unrounded so that line totals and cart totals are
/// computed on the original amounts; rounding to cents happens only when a
/// price is shown or submitted. Prices are signed: the cart never validates
/// them, so a negative amount coming from the catalog is carried through
/// unchanged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    amount: Decimal,
}

impl Price {
    /// A zero price.
    pub const ZERO: Price = Price {
        amount: Decimal::ZERO,
    };

    /// Creates a new price from minor units.
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Price {
            amount: Decimal::new(minor, MONEY_DP),
        }
    }

    /// Creates a price from a decimal amount in major units.
    #[must_use]
    pub fn from_decimal(amount: Decimal) -> Self {
        Price { amount }
    }

    /// Creates a price from a floating point amount in major units, as sent by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFinite`] for NaN, infinite or unrepresentable input.
    pub fn from_major(amount: f64) -> Result<Self, PriceError> {
        let amount = Decimal::from_f64(amount).ok_or(PriceError::NotFinite(amount))?;

        Ok(Price { amount })
    }

    /// Returns the exact amount in major units.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        self.amount
    }

    /// Returns the amount rounded to cents, half away from zero.
    #[must_use]
    pub fn rounded(self) -> Decimal {
        let mut rounded = self
            .amount
            .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);

        rounded.rescale(MONEY_DP);

        rounded
    }

    /// Returns the rounded amount in minor units, saturating at the numeric bounds.
    #[must_use]
    pub fn to_minor_units(self) -> i64 {
        let rounded = self.rounded();

        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i64())
            .unwrap_or(if rounded.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            })
    }

    /// Returns the rounded amount in major units as a float, for JSON payloads that expect a number.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.rounded().to_f64().unwrap_or_default()
    }

    /// Multiplies the price by a quantity, saturating at the numeric bounds.
    #[must_use]
    pub fn times(self, quantity: u32) -> Price {
        Price {
            amount: self.amount.saturating_mul(Decimal::from(quantity)),
        }
    }

    /// Adds two prices, saturating at the numeric bounds.
    #[must_use]
    pub fn saturating_add(self, other: Price) -> Price {
        Price {
            amount: self.amount.saturating_add(other.amount),
        }
    }

    /// Converts the rounded price into money of the given currency.
    #[must_use]
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_decimal(self.rounded(), currency)
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.amount
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}
