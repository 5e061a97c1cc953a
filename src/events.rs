//! Observable engine events.
//!
//! Events are produced by committed operations only: a rolled-back router
//! call records nothing. They accumulate in the
//! [`PoolRegistry`](crate::registry::PoolRegistry) in commit order and can
//! be read with [`PoolRegistry::events`](crate::registry::PoolRegistry::events)
//! or taken with [`PoolRegistry::drain_events`](crate::registry::PoolRegistry::drain_events).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, AssetId, PoolId, Shares};

/// Something that happened to a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AmmEvent {
    /// A pool was created for a new canonical pair.
    PairCreated {
        /// Lower-ordered asset.
        asset0: AssetId,
        /// Higher-ordered asset.
        asset1: AssetId,
        /// The new pool.
        pool: PoolId,
    },
    /// Liquidity was deposited and shares issued.
    Mint {
        /// Pool deposited into.
        pool: PoolId,
        /// Account that supplied the assets and received the shares.
        sender: AccountId,
        /// Amount of `asset0` deposited.
        amount0: Amount,
        /// Amount of `asset1` deposited.
        amount1: Amount,
        /// Shares issued to `sender`.
        shares: Shares,
    },
    /// Shares were burned and reserves released.
    Burn {
        /// Pool withdrawn from.
        pool: PoolId,
        /// Account whose shares were burned and who received the assets.
        sender: AccountId,
        /// Amount of `asset0` released.
        amount0: Amount,
        /// Amount of `asset1` released.
        amount1: Amount,
        /// Shares burned.
        shares: Shares,
    },
    /// One asset was sold for the other.
    Swap {
        /// Pool traded against.
        pool: PoolId,
        /// Account that initiated the trade.
        sender: AccountId,
        /// Asset sold into the pool.
        asset_in: AssetId,
        /// Amount sold.
        amount_in: Amount,
        /// Amount of the other asset bought.
        amount_out: Amount,
        /// Account the output was paid to: the next pool or the caller.
        to: AccountId,
    },
    /// A pool's reserves after an update.
    Sync {
        /// Pool updated.
        pool: PoolId,
        /// New reserve of `asset0`.
        reserve0: Amount,
        /// New reserve of `asset1`.
        reserve1: Amount,
    },
}

impl AmmEvent {
    /// The pool the event concerns.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        match self {
            Self::PairCreated { pool, .. }
            | Self::Mint { pool, .. }
            | Self::Burn { pool, .. }
            | Self::Swap { pool, .. }
            | Self::Sync { pool, .. } => *pool,
        }
    }

    /// Short event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PairCreated { .. } => "PairCreated",
            Self::Mint { .. } => "Mint",
            Self::Burn { .. } => "Burn",
            Self::Swap { .. } => "Swap",
            Self::Sync { .. } => "Sync",
        }
    }
}

impl fmt::Display for AmmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.pool())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_tag() {
        let event = AmmEvent::Sync {
            pool: PoolId::from_bytes([0xAB; 32]),
            reserve0: Amount::new(10),
            reserve1: Amount::new(20),
        };
        let Ok(json) = serde_json::to_value(event) else {
            panic!("expected Ok");
        };
        assert_eq!(json["event"], "sync");
        assert_eq!(json["reserve0"], 10);

        let Ok(back) = serde_json::from_value::<AmmEvent>(json) else {
            panic!("expected Ok");
        };
        assert_eq!(back, event);
    }

    #[test]
    fn name_and_pool() {
        let pool = PoolId::from_bytes([1u8; 32]);
        let event = AmmEvent::Mint {
            pool,
            sender: AccountId::from_bytes([2u8; 32]),
            amount0: Amount::new(1),
            amount1: Amount::new(1),
            shares: Shares::new(1),
        };
        assert_eq!(event.name(), "Mint");
        assert_eq!(event.pool(), pool);
        assert!(event.to_string().starts_with("Mint(0x0101"));
    }
}
