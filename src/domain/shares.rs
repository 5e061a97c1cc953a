//! Liquidity share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A quantity of pool liquidity shares.
///
/// Kept distinct from [`Amount`](super::Amount): shares are claims on a
/// pro-rata slice of both reserves, not a quantity of either asset.
///
/// # Examples
///
/// ```
/// use pairdex::domain::Shares;
///
/// let held = Shares::new(316);
/// assert_eq!(held.checked_sub(&Shares::new(16)), Some(Shares::new(300)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for zero shares.
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

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_constant() {
        assert!(Shares::ZERO.is_zero());
        assert_eq!(Shares::default(), Shares::ZERO);
    }

    #[test]
    fn checked_ops() {
        assert_eq!(
            Shares::new(1).checked_add(&Shares::new(2)),
            Some(Shares::new(3))
        );
        assert_eq!(Shares::new(1).checked_sub(&Shares::new(2)), None);
        assert_eq!(Shares::new(u128::MAX).checked_add(&Shares::new(1)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Shares::new(316).to_string(), "316");
    }
}
