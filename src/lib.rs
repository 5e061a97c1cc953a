//! # pairdex
//!
//! Constant-product automated market maker engine: a registry of
//! content-addressed pair pools, a reserve and share ledger per pool, and
//! a router that runs liquidity and swap operations atomically against an
//! external token ledger.
//!
//! The engine holds no tokens itself. Balances live behind the
//! [`TokenLedger`](traits::TokenLedger) trait; each pool's reserves sit in
//! a custody account derived from its [`PoolId`](domain::PoolId).
//!
//! # Quick Start
//!
//! ```rust
//! use pairdex::prelude::*;
//!
//! let usdt = AssetId::from_bytes([0xFF; 32]);
//! let swx = AssetId::from_bytes([0x01; 32]);
//! let trader = AccountId::from_bytes([0xA1; 32]);
//! let router_account = AccountId::from_bytes([0xEE; 32]);
//!
//! // 1. Fund the trader and approve the router
//! let mut ledger = InMemoryLedger::new();
//! for asset in [usdt, swx] {
//!     ledger.mint(&asset, &trader, Amount::new(10_000_000)).expect("mint");
//!     ledger.approve(&asset, &trader, &router_account, Amount::MAX).expect("approve");
//! }
//!
//! // 2. Assemble the engine
//! let registry = PoolRegistry::new(AmmConfig::default());
//! let clock = ManualClock::new(Timestamp::new(0));
//! let mut router = Router::new(router_account, registry, ledger, clock);
//!
//! // 3. Seed a pool: 1 SWX = 0.01 USDT
//! router
//!     .add_liquidity(&trader, AddLiquidity {
//!         asset_a: swx,
//!         asset_b: usdt,
//!         amount_a_desired: Amount::new(1_000_000),
//!         amount_b_desired: Amount::new(10_000),
//!         amount_a_min: Amount::ZERO,
//!         amount_b_min: Amount::ZERO,
//!         deadline: Timestamp::new(60),
//!     })
//!     .expect("liquidity added");
//!
//! // 4. Sell 10 000 SWX for USDT
//! let receipt = router
//!     .swap_exact_input(&trader, &[swx, usdt], Amount::new(10_000), Amount::new(90), Timestamp::new(60))
//!     .expect("swap succeeded");
//! assert_eq!(receipt.amount_out(), Amount::new(98));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  deadline check, staged transaction, commit
//! └──────┬──────┘
//!        │ resolve / create
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  canonical pair → PoolId → Pool, event log
//! └──────┬──────┘
//!        │ mint / burn / swap
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  reserves, shares, x · y = k
//! └──────┬──────┘
//!        │ transfers (through the router)
//!        ▼
//! ┌─────────────┐
//! │ TokenLedger  │  balances and allowances
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), [`PoolId`](domain::PoolId), etc. |
//! | [`traits`] | Collaborators: [`TokenLedger`](traits::TokenLedger), [`Clock`](traits::Clock) |
//! | [`config`] | [`AmmConfig`](config::AmmConfig): fee tier and locked liquidity, from code or TOML |
//! | [`pool`] | [`Pool`](pool::Pool), the constant-product reserve and share ledger |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry), pair → pool |
//! | [`router`] | [`Router`](router::Router), atomic multi-step operations |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`events`] | [`AmmEvent`](events::AmmEvent) records of committed operations |
//! | [`math`] | Checked and 256-bit integer arithmetic |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber: pool
//! creation at `info`, pool operations and router commits at `debug`,
//! rollbacks and commit compensation at `warn`.

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod traits;
