//! The token ledger collaborator.
//!
//! The engine never holds balances itself. Every movement of an asset goes
//! through a [`TokenLedger`], which owns per-asset balances and allowances
//! and may refuse any transfer.
//!
//! # Authority Model
//!
//! There is no implicit message sender: every operation names the account
//! whose authority it exercises.
//!
//! | Operation | Debited account | Authority |
//! |-----------|-----------------|-----------|
//! | [`transfer`](TokenLedger::transfer) | `from` | `from` itself |
//! | [`transfer_from`](TokenLedger::transfer_from) | `owner` | `spender`'s allowance |
//! | [`approve`](TokenLedger::approve) | none | `owner` itself |
//!
//! The [`Router`](crate::router::Router) pulls caller funds with
//! `transfer_from` (itself as spender) and pays out of pool custody
//! accounts with `transfer`.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::LedgerError;

/// Per-asset balances, allowances and transfers.
///
/// Implementations must be consistent with their own reads: a transfer of
/// at most [`balance_of`](Self::balance_of) (and, for `transfer_from`, at
/// most [`allowance`](Self::allowance)) must succeed unless the credit
/// overflows.
pub trait TokenLedger {
    /// Balance of `asset` held by `account`.
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount;

    /// Amount of `owner`'s `asset` that `spender` may move.
    fn allowance(&self, asset: &AssetId, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than `amount`.
    /// - [`LedgerError::Overflow`] if crediting `to` would overflow.
    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `owner`'s `asset` to `to`, spending `spender`'s
    /// allowance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if the allowance is too small.
    /// - [`LedgerError::InsufficientBalance`] if `owner` holds less than `amount`.
    /// - [`LedgerError::Overflow`] if crediting `to` would overflow.
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Sets the allowance of `spender` over `owner`'s `asset` to `amount`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse; the in-memory ledger never does.
    fn approve(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}
