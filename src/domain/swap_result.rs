//! Outcome of a single pool swap.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, AssetId};

/// What one [`Pool::swap`](crate::pool::Pool::swap) did.
///
/// `fee` is the part of `amount_in` that was not priced; it stays in the
/// pool and is what makes the reserve product grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    asset_in: AssetId,
    asset_out: AssetId,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    pub(crate) const fn new(
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Self {
        Self {
            asset_in,
            asset_out,
            amount_in,
            amount_out,
            fee,
        }
    }

    /// The asset paid into the pool.
    #[must_use]
    pub const fn asset_in(&self) -> AssetId {
        self.asset_in
    }

    /// The asset paid out of the pool.
    #[must_use]
    pub const fn asset_out(&self) -> AssetId {
        self.asset_out
    }

    /// Gross input, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output paid to the next hop or the caller.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee retained by the pool.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={} {}, out={} {}, fee={})",
            self.amount_in, self.asset_in, self.amount_out, self.asset_out, self.fee
        )
    }
}
