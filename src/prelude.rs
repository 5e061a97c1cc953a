//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pairdex::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, FeeTier, LiquidityPosition, PoolId,
    Rounding, Shares, SwapResult, Timestamp,
};

pub use crate::traits::{Clock, ManualClock, SystemClock, TokenLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::AmmConfig;

pub use crate::error::{AmmError, LedgerError, Result};

pub use crate::events::AmmEvent;

pub use crate::ledger::InMemoryLedger;

pub use crate::pool::Pool;

pub use crate::registry::PoolRegistry;

pub use crate::router::{
    AddLiquidity, LiquidityAdded, LiquidityRemoved, RemoveLiquidity, Router, SwapReceipt,
};
