//! Router call parameters and receipts.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, AssetId, PoolId, Shares, SwapResult, Timestamp};

/// Arguments of [`Router::add_liquidity`](super::Router::add_liquidity).
///
/// `asset_a`/`asset_b` are in the caller's order, not the canonical one;
/// every amount refers to the asset of the same letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidity {
    /// First asset, as the caller names it.
    pub asset_a: AssetId,
    /// Second asset, as the caller names it.
    pub asset_b: AssetId,
    /// Most of `asset_a` the caller will deposit.
    pub amount_a_desired: Amount,
    /// Most of `asset_b` the caller will deposit.
    pub amount_b_desired: Amount,
    /// Least of `asset_a` the caller accepts depositing.
    pub amount_a_min: Amount,
    /// Least of `asset_b` the caller accepts depositing.
    pub amount_b_min: Amount,
    /// Last accepted time, inclusive.
    pub deadline: Timestamp,
}

/// Arguments of [`Router::remove_liquidity`](super::Router::remove_liquidity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidity {
    /// First asset, as the caller names it.
    pub asset_a: AssetId,
    /// Second asset, as the caller names it.
    pub asset_b: AssetId,
    /// Shares to burn.
    pub shares: Shares,
    /// Least of `asset_a` the caller accepts receiving.
    pub amount_a_min: Amount,
    /// Least of `asset_b` the caller accepts receiving.
    pub amount_b_min: Amount,
    /// Last accepted time, inclusive.
    pub deadline: Timestamp,
}

/// What an add-liquidity call deposited and issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiquidityAdded {
    /// Pool deposited into, possibly created by the call.
    pub pool: PoolId,
    /// Amount of `asset_a` pulled from the caller.
    pub amount_a: Amount,
    /// Amount of `asset_b` pulled from the caller.
    pub amount_b: Amount,
    /// Shares issued to the caller.
    pub shares: Shares,
}

/// What a remove-liquidity call paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiquidityRemoved {
    /// Pool withdrawn from.
    pub pool: PoolId,
    /// Amount of `asset_a` paid to the caller.
    pub amount_a: Amount,
    /// Amount of `asset_b` paid to the caller.
    pub amount_b: Amount,
}

/// What a swap call traded, hop by hop.
///
/// `amounts[0]` is what the caller paid and `amounts[n - 1]` what the
/// caller received; `amounts[i]` for `0 < i < n - 1` moved pool to pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapReceipt {
    /// The assets traded through, in order.
    pub path: Vec<AssetId>,
    /// The amount entering each hop, then the final output.
    pub amounts: Vec<Amount>,
    /// Per-pool results, one per hop.
    pub hops: Vec<SwapResult>,
}

impl SwapReceipt {
    /// What the caller paid.
    #[must_use]
    pub fn amount_in(&self) -> Amount {
        self.amounts.first().copied().unwrap_or(Amount::ZERO)
    }

    /// What the caller received.
    #[must_use]
    pub fn amount_out(&self) -> Amount {
        self.amounts.last().copied().unwrap_or(Amount::ZERO)
    }

    /// Fees charged across all hops, each in its own hop's input asset.
    pub fn fees(&self) -> impl Iterator<Item = (AssetId, Amount)> + '_ {
        self.hops.iter().map(|hop| (hop.asset_in(), hop.fee()))
    }
}
