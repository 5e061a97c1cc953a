//! Integer arithmetic for reserve and share accounting.
//!
//! All engine math is integer-only with an explicit rounding direction.
//! This module provides [`CheckedArithmetic`] for overflow-safe newtype
//! operations and 256-bit helpers ([`mul_div`], [`sqrt_product`],
//! [`product`]) for products that exceed the word width.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{mul_div, narrow, product, sqrt_product, U256};
