//! Unified error types for the pairdex engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every variant describes a pre- or post-condition failure of
//! a single atomic operation: when an error is returned, no pool, registry
//! or ledger state has been changed by the failing call.

use thiserror::Error;

use crate::domain::{AccountId, Amount, AssetId, Timestamp};

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Errors raised by the [`TokenLedger`](crate::traits::TokenLedger)
/// collaborator when it refuses to move balances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The source account does not hold enough of the asset.
    #[error("insufficient balance of {asset} in {account}: have {available}, need {required}")]
    InsufficientBalance {
        /// Asset being moved.
        asset: AssetId,
        /// Account being debited.
        account: AccountId,
        /// Balance currently held.
        available: Amount,
        /// Amount the operation needs.
        required: Amount,
    },

    /// The spender has not been approved for enough of the owner's asset.
    #[error("insufficient allowance of {asset} from {owner} to {spender}: have {available}, need {required}")]
    InsufficientAllowance {
        /// Asset being moved.
        asset: AssetId,
        /// Account that granted the allowance.
        owner: AccountId,
        /// Account spending the allowance.
        spender: AccountId,
        /// Allowance currently granted.
        available: Amount,
        /// Amount the operation needs.
        required: Amount,
    },

    /// Crediting the destination would overflow its balance.
    #[error("balance overflow crediting {asset} to {account}")]
    Overflow {
        /// Asset being moved.
        asset: AssetId,
        /// Account being credited.
        account: AccountId,
    },
}

/// The single error type returned by every fallible engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Both sides of a pair (or two consecutive path hops) name the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// The asset is not one of the pool's two assets.
    #[error("asset is not part of this pool")]
    InvalidAsset,

    /// No pool exists for the requested pair.
    #[error("no pool exists for the pair")]
    PoolNotFound,

    /// A deposit would issue zero shares (or not exceed the locked minimum).
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A withdrawal would pay out zero of at least one asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// The owner does not hold the shares being burned, or burns zero.
    #[error("insufficient shares")]
    InsufficientShares,

    /// A swap was requested with a zero input amount.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// A swap output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// An exact-output swap needs more input than the caller's maximum.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// The pool has no reserves, or cannot pay the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The asset-A amount fell outside the caller's bounds.
    #[error("insufficient A amount")]
    InsufficientAAmount,

    /// The asset-B amount fell outside the caller's bounds.
    #[error("insufficient B amount")]
    InsufficientBAmount,

    /// A swap path has fewer than two assets.
    #[error("invalid path: at least two assets are required")]
    InvalidPath,

    /// The call arrived after its deadline.
    #[error("expired: deadline {deadline} has passed (now {now})")]
    Expired {
        /// Caller-supplied deadline.
        deadline: Timestamp,
        /// Time observed at call entry.
        now: Timestamp,
    },

    /// The post-swap product of reserves decreased.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Config(String),

    /// The token ledger refused a transfer.
    #[error("ledger rejected transfer: {0}")]
    Ledger(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_error_converts() {
        let err: AmmError = LedgerError::Overflow {
            asset: AssetId::from_bytes([1u8; 32]),
            account: AccountId::from_bytes([2u8; 32]),
        }
        .into();
        assert!(matches!(err, AmmError::Ledger(LedgerError::Overflow { .. })));
    }

    #[test]
    fn expired_display_includes_times() {
        let err = AmmError::Expired {
            deadline: Timestamp::new(10),
            now: Timestamp::new(11),
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("11"));
    }

    #[test]
    fn overflow_display_includes_context() {
        assert_eq!(
            AmmError::Overflow("reserve0").to_string(),
            "arithmetic overflow: reserve0"
        );
    }
}
