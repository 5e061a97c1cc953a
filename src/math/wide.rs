//! 256-bit intermediates for reserve and share math.
//!
//! Reserves, amounts and shares are `u128`, but their products are not:
//! ten billion 18-decimal tokens on both sides of a pool is already
//! `1e56`, far beyond `u128::MAX`. Every product is therefore formed in
//! [`U256`] and narrowed back with an explicit overflow check.
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, share payout, shares issued | [`Rounding::Down`] |
//! | Fee, required exact-output input | [`Rounding::Up`] |

use crate::domain::Rounding;
use crate::error::AmmError;

#[allow(clippy::all, missing_docs)]
mod u256 {
    uint::construct_uint! {
        /// Unsigned 256-bit integer for intermediate products.
        pub struct U256(4);
    }
}

pub use u256::U256;

/// Narrows a [`U256`] to `u128`, or `None` if it does not fit.
#[must_use]
pub fn narrow(value: U256) -> Option<u128> {
    if value.bits() > 128 {
        None
    } else {
        Some(value.low_u128())
    }
}

/// Computes `a * b` in 256 bits.
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Computes `a * b / c` with explicit rounding, the product carried in
/// 256 bits.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `c` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use pairdex::domain::Rounding;
/// use pairdex::math::mul_div;
///
/// // (u128::MAX * 4) / 8 would overflow in u128 arithmetic
/// let q = mul_div(u128::MAX, 4, 8, Rounding::Down).expect("fits");
/// assert_eq!(q, u128::MAX / 2);
/// ```
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if c == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let numerator = product(a, b);
    let denominator = U256::from(c);
    let mut quotient = numerator / denominator;
    if rounding.is_up() && !(numerator % denominator).is_zero() {
        quotient += U256::one();
    }
    narrow(quotient).ok_or(AmmError::Overflow("mul_div quotient exceeds u128"))
}

/// Computes `floor(sqrt(a * b))`, the geometric mean used to size the
/// first deposit's shares.
///
/// The square root of a 256-bit product always fits in 128 bits.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    product(a, b).integer_sqrt().low_u128()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_of_spec_first_deposit() {
        // sqrt(10_000 * 10) = sqrt(100_000) = 316.22...
        assert_eq!(sqrt_product(10_000, 10), 316);
    }

    #[test]
    fn sqrt_of_perfect_square() {
        assert_eq!(sqrt_product(1_000_000, 1_000_000), 1_000_000);
        assert_eq!(sqrt_product(0, 5), 0);
    }

    #[test]
    fn sqrt_of_huge_product() {
        assert_eq!(sqrt_product(u128::MAX, u128::MAX), u128::MAX);
    }

    #[test]
    fn mul_div_floor_and_ceil() {
        let (Ok(down), Ok(up)) = (
            mul_div(10, 99, 10_099, Rounding::Down),
            mul_div(10, 99, 10_099, Rounding::Up),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(down, 0);
        assert_eq!(up, 1);
    }

    #[test]
    fn mul_div_beyond_u128_product() {
        let big = 10u128.pow(25);
        let Ok(q) = mul_div(big, big, big, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(q, big);
    }

    #[test]
    fn mul_div_errors() {
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(AmmError::DivisionByZero));
        assert!(matches!(
            mul_div(u128::MAX, u128::MAX, 1, Rounding::Down),
            Err(AmmError::Overflow(_))
        ));
    }

    #[test]
    fn narrow_bounds() {
        assert_eq!(narrow(U256::from(u128::MAX)), Some(u128::MAX));
        assert_eq!(narrow(U256::from(u128::MAX) + U256::one()), None);
    }
}
