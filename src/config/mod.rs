//! Engine configuration.
//!
//! [`AmmConfig`] is the declarative blueprint for every pool the registry
//! creates: the swap fee and the amount of liquidity permanently locked on
//! a pool's first deposit. It can be built in code or parsed from TOML.

mod amm_config;

pub use amm_config::{AmmConfig, DEFAULT_MINIMUM_LIQUIDITY};
