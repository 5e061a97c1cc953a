//! Derived view of one owner's liquidity.

use serde::Serialize;

use super::{AccountId, Amount, Shares};

/// An owner's claim on a pool at the moment it was read.
///
/// `amount0`/`amount1` are what burning all of `shares` would pay out now:
/// `floor(reserve_i * shares / total_shares)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiquidityPosition {
    /// Owner of the shares.
    pub owner: AccountId,
    /// Shares held.
    pub shares: Shares,
    /// Outstanding shares of the whole pool.
    pub total_shares: Shares,
    /// Redeemable amount of `asset0`.
    pub amount0: Amount,
    /// Redeemable amount of `asset1`.
    pub amount1: Amount,
}

impl LiquidityPosition {
    /// Returns `true` if the owner holds no shares.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shares.is_zero()
    }
}
