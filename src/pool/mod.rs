//! Liquidity pools.
//!
//! A [`Pool`] is the reserve and share ledger for one canonical asset
//! pair, priced by the constant-product curve `reserve0 · reserve1 = k`.

mod constant_product;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::Pool;
