//! A `BTreeMap`-backed [`TokenLedger`].

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::LedgerError;
use crate::traits::TokenLedger;

/// Reference ledger holding every balance and allowance in memory.
///
/// Besides the [`TokenLedger`] operations it offers [`mint`](Self::mint)
/// for seeding balances, which is how the deployment harness and the tests
/// fund accounts.
///
/// ```
/// use pairdex::domain::{AccountId, Amount, AssetId};
/// use pairdex::ledger::InMemoryLedger;
/// use pairdex::traits::TokenLedger;
///
/// let usdt = AssetId::from_bytes([7u8; 32]);
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let bob = AccountId::from_bytes([2u8; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(&usdt, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(&usdt, &alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(&usdt, &bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<(AssetId, AccountId), Amount>,
    allowances: BTreeMap<(AssetId, AccountId, AccountId), Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `asset` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the balance would overflow.
    pub fn mint(
        &mut self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let credited = self.credited(asset, account, amount)?;
        self.set_balance(asset, account, credited);
        Ok(())
    }

    fn credited(
        &self,
        asset: &AssetId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        self.balance_of(asset, account)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow {
                asset: *asset,
                account: *account,
            })
    }

    fn set_balance(&mut self, asset: &AssetId, account: &AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(*asset, *account));
        } else {
            self.balances.insert((*asset, *account), amount);
        }
    }

    fn set_allowance(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) {
        let key = (*asset, *owner, *spender);
        if amount.is_zero() {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.balances
            .get(&(*asset, *account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, asset: &AssetId, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*asset, *owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(asset, from);
        let Some(debited) = available.checked_sub(&amount) else {
            return Err(LedgerError::InsufficientBalance {
                asset: *asset,
                account: *from,
                available,
                required: amount,
            });
        };
        if from == to {
            return Ok(());
        }
        let credited = self.credited(asset, to, amount)?;
        self.set_balance(asset, from, debited);
        self.set_balance(asset, to, credited);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let granted = self.allowance(asset, owner, spender);
        let Some(remaining) = granted.checked_sub(&amount) else {
            return Err(LedgerError::InsufficientAllowance {
                asset: *asset,
                owner: *owner,
                spender: *spender,
                available: granted,
                required: amount,
            });
        };
        self.transfer(asset, owner, to, amount)?;
        self.set_allowance(asset, owner, spender, remaining);
        Ok(())
    }

    fn approve(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.set_allowance(asset, owner, spender, amount);
        Ok(())
    }
}
