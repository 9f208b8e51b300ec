//! Minor-unit money arithmetic for split payments.
//!
//! All financial math happens on integer minor units (cents for USD) derived
//! from [`rust_decimal::Decimal`] amounts. Rounding is half-away-from-zero
//! throughout, matching the payment provider's own arithmetic, and the fee
//! split is computed so that `platform_fee + vendor_share` always equals the
//! charged total exactly.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors converting a decimal amount into minor units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// The amount is zero or negative.
    #[error("amount must be greater than 0")]
    NotPositive,
    /// The amount does not fit in 64-bit minor units.
    #[error("amount is too large to represent in minor units")]
    Overflow,
}

/// Errors constructing a [`FeeRate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeeRateError {
    /// The rate is outside `[0, 1]`.
    #[error("fee rate must be between 0 and 1, got {0}")]
    OutOfRange(Decimal),
}

/// An amount of money in integer minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Wrap an already-converted minor-unit amount.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Convert a decimal currency amount (e.g. `19.99` dollars) into minor
    /// units, rounding half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NotPositive`] for zero or negative amounts and
    /// [`MoneyError::Overflow`] when the result does not fit in `i64`.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount <= Decimal::ZERO {
            return Err(MoneyError::NotPositive);
        }
        let minor = (amount * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        minor.to_i64().map(Self).ok_or(MoneyError::Overflow)
    }

    /// Get the underlying minor-unit count.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Split this total into a platform fee and the vendor's share.
    ///
    /// The fee is `round(total * rate)` (half away from zero); the vendor
    /// share is the exact remainder, so no rounding leak is possible.
    #[must_use]
    pub fn split(self, rate: FeeRate) -> FeeSplit {
        let fee = (Decimal::from(self.0) * rate.as_decimal())
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0);
        FeeSplit {
            total: self,
            platform_fee: Self(fee),
            vendor_share: Self(self.0 - fee),
        }
    }
}

impl std::fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The platform's take rate, a decimal fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRate(Decimal);

impl FeeRate {
    /// Create a fee rate, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`FeeRateError::OutOfRange`] if `rate` is not in `[0, 1]`.
    pub fn new(rate: Decimal) -> Result<Self, FeeRateError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(FeeRateError::OutOfRange(rate));
        }
        Ok(Self(rate))
    }

    /// Get the rate as a decimal fraction.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Default for FeeRate {
    /// The platform default: a 10% take rate.
    fn default() -> Self {
        Self(Decimal::new(10, 2))
    }
}

impl std::fmt::Display for FeeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of splitting a charge between the platform and a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeSplit {
    /// The full charged amount.
    pub total: MinorUnits,
    /// The platform's retained fee.
    pub platform_fee: MinorUnits,
    /// What the vendor's sub-account receives.
    pub vendor_share: MinorUnits,
}
