//! Pool creation and lookup.
//!
//! [`PoolRegistry`] maps each canonical [`AssetPair`](crate::domain::AssetPair)
//! to exactly one [`Pool`](crate::pool::Pool), identified by the
//! content-addressed [`PoolId`](crate::domain::PoolId) of the pair.

mod pool_registry;

pub use pool_registry::PoolRegistry;
