//! Swap fee rate.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The fee rate a pool charges on swap input.
///
/// The fee is taken from the input before pricing and rounds up, so the
/// pool never under-collects. With the standard 30 bp tier, 100 units in
/// leave an effective input of 99.
///
/// # Examples
///
/// ```
/// use pairdex::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// let (net, fee) = tier.split_input(Amount::new(100)).expect("in range");
/// assert_eq!((net.get(), fee.get()), (99, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05%, stable pairs.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30%, the standard constant-product fee.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00%, exotic pairs.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a tier from arbitrary basis points.
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if the rate is strictly below 100%, the only rates a
    /// pool can price with.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.0.get() < BasisPoints::MAX_PERCENT.get()
    }

    /// Splits a gross input into `(effective_input, fee)`.
    ///
    /// `fee = ceil(amount_in * bps / 10_000)`; the effective input is the
    /// remainder, i.e. `floor(amount_in * (10_000 - bps) / 10_000)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if the fee computation overflows.
    /// - [`AmmError::Underflow`] if the rate exceeds 100%.
    pub fn split_input(&self, amount_in: Amount) -> crate::error::Result<(Amount, Amount)> {
        let fee = self.0.apply(amount_in, Rounding::Up)?;
        let net = amount_in
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("fee exceeds input"))?;
        Ok((net, fee))
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
