//! Checked arithmetic that reports errors as [`AmmError`].
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning methods of the
//! quantity newtypes into `Result`s with a specific variant, so pool code
//! can chain them with `?`.
//!
//! ```
//! use pairdex::domain::Amount;
//! use pairdex::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(10_000);
//! assert!(reserve.safe_add(&Amount::new(100)).is_ok());
//! assert!(Amount::ZERO.safe_sub(&Amount::new(1)).is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for quantity newtypes.
///
/// - No panics: every failure is an `Err`.
/// - No saturation: an overflow is a bug to surface, not a value to clamp.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }
}
