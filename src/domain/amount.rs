//! Raw token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw quantity of one asset, in the asset's smallest unit.
///
/// Reserves, deposits, withdrawals and swap legs are all `Amount`s.
/// Arithmetic is checked and returns `None` instead of wrapping or
/// panicking; wide intermediate products go through
/// [`math::mul_div`](crate::math::mul_div) instead.
///
/// # Examples
///
/// ```
/// use pairdex::domain::Amount;
///
/// let reserve = Amount::new(10_000);
/// assert_eq!(reserve.checked_add(&Amount::new(100)), Some(Amount::new(10_100)));
/// assert_eq!(reserve.checked_sub(&Amount::new(10_001)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for a zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
