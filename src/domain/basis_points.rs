//! Basis-point percentages.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;
use crate::math::mul_div;

/// Denominator of a basis-point fraction (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage in basis points (1 bp = 0.01%).
///
/// Values above [`BPS_DENOMINATOR`] are representable but are not valid
/// percentages; configuration rejects them.
///
/// # Examples
///
/// ```
/// use pairdex::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.complement(), Some(BasisPoints::new(9_970)));
/// assert_eq!(bp.apply(Amount::new(100), Rounding::Up).ok(), Some(Amount::new(1)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Wraps a raw basis-point value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// `100% - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `amount * self / 10_000` with explicit rounding, the
    /// product carried in 256 bits.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit in `u128`,
    /// which needs a value above 100%.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount, AmmError> {
        mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )
        .map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
