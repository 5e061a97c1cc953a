//! Staged router state.
//!
//! A router call runs against a [`Transaction`]: copies of the pools it
//! touches, pools it creates, a [`LedgerOverlay`] recording transfers
//! without performing them, and the events it would emit. Nothing reaches
//! the registry or the ledger until the call succeeds and
//! [`Transaction::into_changes`] is committed.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::{AccountId, Amount, AssetId, AssetPair, PoolId};
use crate::error::{AmmError, LedgerError};
use crate::events::AmmEvent;
use crate::pool::Pool;
use crate::registry::PoolRegistry;
use crate::traits::TokenLedger;

/// A transfer recorded by the overlay, replayed on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LedgerOp {
    Transfer {
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    TransferFrom {
        asset: AssetId,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    },
}

impl LedgerOp {
    fn apply<L: TokenLedger>(&self, ledger: &mut L) -> Result<(), LedgerError> {
        match *self {
            Self::Transfer {
                asset,
                from,
                to,
                amount,
            } => ledger.transfer(&asset, &from, &to, amount),
            Self::TransferFrom {
                asset,
                spender,
                owner,
                to,
                amount,
            } => ledger.transfer_from(&asset, &spender, &owner, &to, amount),
        }
    }

    /// Undoes an applied op: moves the amount back and restores any
    /// allowance it spent.
    fn compensate<L: TokenLedger>(&self, ledger: &mut L) -> Result<(), LedgerError> {
        match *self {
            Self::Transfer {
                asset,
                from,
                to,
                amount,
            } => ledger.transfer(&asset, &to, &from, amount),
            Self::TransferFrom {
                asset,
                spender,
                owner,
                to,
                amount,
            } => {
                ledger.transfer(&asset, &to, &owner, amount)?;
                let restored = ledger
                    .allowance(&asset, &owner, &spender)
                    .checked_add(&amount)
                    .unwrap_or(Amount::MAX);
                ledger.approve(&asset, &owner, &spender, restored)
            }
        }
    }
}

/// Read-through view of a ledger with staged, unapplied transfers.
///
/// Balances and allowances read from the overlay reflect every staged op,
/// and each staged op is checked exactly as the ledger would check it.
#[derive(Debug)]
pub(crate) struct LedgerOverlay<'a, L> {
    ledger: &'a L,
    balances: BTreeMap<(AssetId, AccountId), Amount>,
    allowances: BTreeMap<(AssetId, AccountId, AccountId), Amount>,
    ops: Vec<LedgerOp>,
}

impl<'a, L: TokenLedger> LedgerOverlay<'a, L> {
    pub(crate) fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            ops: Vec::new(),
        }
    }

    pub(crate) fn balance_of(&self, asset: &AssetId, account: &AccountId) -> Amount {
        self.balances
            .get(&(*asset, *account))
            .copied()
            .unwrap_or_else(|| self.ledger.balance_of(asset, account))
    }

    pub(crate) fn allowance(
        &self,
        asset: &AssetId,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Amount {
        self.allowances
            .get(&(*asset, *owner, *spender))
            .copied()
            .unwrap_or_else(|| self.ledger.allowance(asset, owner, spender))
    }

    pub(crate) fn transfer(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.stage_move(asset, from, to, amount)?;
        self.ops.push(LedgerOp::Transfer {
            asset: *asset,
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }

    pub(crate) fn transfer_from(
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
        self.stage_move(asset, owner, to, amount)?;
        self.allowances.insert((*asset, *owner, *spender), remaining);
        self.ops.push(LedgerOp::TransferFrom {
            asset: *asset,
            spender: *spender,
            owner: *owner,
            to: *to,
            amount,
        });
        Ok(())
    }

    fn stage_move(
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
        let credited = self
            .balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow {
                asset: *asset,
                account: *to,
            })?;
        self.balances.insert((*asset, *from), debited);
        self.balances.insert((*asset, *to), credited);
        Ok(())
    }
}

/// Everything a successful call will write.
#[derive(Debug)]
pub(crate) struct Changes {
    created: Vec<PoolId>,
    pools: BTreeMap<PoolId, Pool>,
    ops: Vec<LedgerOp>,
    events: Vec<AmmEvent>,
}

impl Changes {
    /// Applies the staged ledger ops, then writes pools and events.
    ///
    /// If the ledger rejects an op, the ops already applied are undone in
    /// reverse order and neither pools nor events are written.
    pub(crate) fn commit<L: TokenLedger>(
        self,
        registry: &mut PoolRegistry,
        ledger: &mut L,
    ) -> Result<(), AmmError> {
        for (index, op) in self.ops.iter().enumerate() {
            if let Err(error) = op.apply(ledger) {
                warn!(
                    %error,
                    applied = index,
                    "ledger rejected staged transfer, compensating"
                );
                for done in self.ops[..index].iter().rev() {
                    if let Err(compensation) = done.compensate(ledger) {
                        warn!(error = %compensation, op = ?done, "compensation failed");
                    }
                }
                return Err(error.into());
            }
        }

        let Self {
            created,
            mut pools,
            events,
            ..
        } = self;
        for id in &created {
            if let Some(pool) = pools.remove(id) {
                registry.insert(pool);
            }
        }
        for pool in pools.into_values() {
            registry.store(pool);
        }
        registry.record(events);
        Ok(())
    }

    pub(crate) fn ledger_ops(&self) -> usize {
        self.ops.len()
    }

    pub(crate) fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// Staged state of one router call.
#[derive(Debug)]
pub(crate) struct Transaction<'a, L> {
    registry: &'a PoolRegistry,
    ledger: LedgerOverlay<'a, L>,
    router: AccountId,
    pools: BTreeMap<PoolId, Pool>,
    created: Vec<PoolId>,
    events: Vec<AmmEvent>,
}

impl<'a, L: TokenLedger> Transaction<'a, L> {
    pub(crate) fn new(registry: &'a PoolRegistry, ledger: &'a L, router: AccountId) -> Self {
        Self {
            registry,
            ledger: LedgerOverlay::new(ledger),
            router,
            pools: BTreeMap::new(),
            created: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Staged counterpart of [`PoolRegistry::resolve_or_create`].
    pub(crate) fn resolve_or_create(
        &mut self,
        asset_a: AssetId,
        asset_b: AssetId,
    ) -> Result<PoolId, AmmError> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        let id = PoolId::derive(&pair);
        if self.registry.pool(&id).is_none() && !self.pools.contains_key(&id) {
            self.pools.insert(id, Pool::new(pair, self.registry.config()));
            self.created.push(id);
        }
        Ok(id)
    }

    /// The id of an existing (or staged) pool for the pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if the assets are equal.
    /// - [`AmmError::PoolNotFound`] if the pair has no pool.
    pub(crate) fn find(&self, asset_a: AssetId, asset_b: AssetId) -> Result<PoolId, AmmError> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        let id = PoolId::derive(&pair);
        if self.pools.contains_key(&id) || self.registry.pool(&id).is_some() {
            Ok(id)
        } else {
            Err(AmmError::PoolNotFound)
        }
    }

    /// Current staged view of a pool.
    pub(crate) fn pool(&self, id: &PoolId) -> Result<&Pool, AmmError> {
        self.pools
            .get(id)
            .or_else(|| self.registry.pool(id))
            .ok_or(AmmError::PoolNotFound)
    }

    /// Mutable staged copy of a pool, cloned from the registry on first use.
    pub(crate) fn pool_mut(&mut self, id: &PoolId) -> Result<&mut Pool, AmmError> {
        if !self.pools.contains_key(id) {
            let pool = self.registry.pool(id).ok_or(AmmError::PoolNotFound)?;
            self.pools.insert(*id, pool.clone());
        }
        self.pools.get_mut(id).ok_or(AmmError::PoolNotFound)
    }

    /// Stages `owner → to` using the router's allowance.
    pub(crate) fn pull(
        &mut self,
        asset: &AssetId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let router = self.router;
        self.ledger
            .transfer_from(asset, &router, owner, to, amount)
            .map_err(AmmError::from)
    }

    /// Stages `from → to` on `from`'s own authority.
    pub(crate) fn pay(
        &mut self,
        asset: &AssetId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.ledger
            .transfer(asset, from, to, amount)
            .map_err(AmmError::from)
    }

    pub(crate) fn emit(&mut self, event: AmmEvent) {
        self.events.push(event);
    }

    /// Emits [`AmmEvent::Sync`] with the pool's staged reserves.
    pub(crate) fn emit_sync(&mut self, id: &PoolId) -> Result<(), AmmError> {
        let pool = self.pool(id)?;
        let event = AmmEvent::Sync {
            pool: *id,
            reserve0: pool.reserve0(),
            reserve1: pool.reserve1(),
        };
        self.events.push(event);
        Ok(())
    }

    pub(crate) fn into_changes(self) -> Changes {
        Changes {
            created: self.created,
            pools: self.pools,
            ops: self.ledger.ops,
            events: self.events,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    const ASSET: AssetId = AssetId::from_bytes([5u8; 32]);
    const OTHER: AssetId = AssetId::from_bytes([6u8; 32]);
    const ALICE: AccountId = AccountId::from_bytes([1u8; 32]);
    const BOB: AccountId = AccountId::from_bytes([2u8; 32]);
    const ROUTER: AccountId = AccountId::from_bytes([0xEE; 32]);

    fn ledger() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        let (Ok(()), Ok(())) = (
            ledger.mint(&ASSET, &ALICE, Amount::new(100)),
            ledger.approve(&ASSET, &ALICE, &ROUTER, Amount::new(60)),
        ) else {
            panic!("expected Ok");
        };
        ledger
    }

    #[test]
    fn overlay_reads_through_and_stages() {
        let ledger = ledger();
        let mut overlay = LedgerOverlay::new(&ledger);
        let Ok(()) = overlay.transfer_from(&ASSET, &ROUTER, &ALICE, &BOB, Amount::new(40)) else {
            panic!("expected Ok");
        };
        assert_eq!(overlay.balance_of(&ASSET, &ALICE), Amount::new(60));
        assert_eq!(overlay.balance_of(&ASSET, &BOB), Amount::new(40));
        assert_eq!(overlay.allowance(&ASSET, &ALICE, &ROUTER), Amount::new(20));
        // the real ledger is untouched
        assert_eq!(ledger.balance_of(&ASSET, &BOB), Amount::ZERO);
    }

    #[test]
    fn overlay_enforces_staged_allowance() {
        let ledger = ledger();
        let mut overlay = LedgerOverlay::new(&ledger);
        let Ok(()) = overlay.transfer_from(&ASSET, &ROUTER, &ALICE, &BOB, Amount::new(40)) else {
            panic!("expected Ok");
        };
        let Err(LedgerError::InsufficientAllowance { available, .. }) =
            overlay.transfer_from(&ASSET, &ROUTER, &ALICE, &BOB, Amount::new(21))
        else {
            panic!("expected InsufficientAllowance");
        };
        assert_eq!(available, Amount::new(20));
    }

    #[test]
    fn overlay_enforces_staged_balance() {
        let ledger = ledger();
        let mut overlay = LedgerOverlay::new(&ledger);
        let Ok(()) = overlay.transfer(&ASSET, &ALICE, &BOB, Amount::new(90)) else {
            panic!("expected Ok");
        };
        let Err(LedgerError::InsufficientBalance { .. }) =
            overlay.transfer(&ASSET, &ALICE, &BOB, Amount::new(11))
        else {
            panic!("expected InsufficientBalance");
        };
        assert_eq!(overlay.ops.len(), 1);
    }

    #[test]
    fn commit_applies_ops_and_creates_pools() {
        let mut registry = PoolRegistry::default();
        let mut ledger = ledger();
        let changes = {
            let mut tx = Transaction::new(&registry, &ledger, ROUTER);
            let Ok(id) = tx.resolve_or_create(ASSET, OTHER) else {
                panic!("expected Ok");
            };
            assert_eq!(tx.find(OTHER, ASSET), Ok(id));
            let Ok(()) = tx.pull(&ASSET, &ALICE, &BOB, Amount::new(10)) else {
                panic!("expected Ok");
            };
            tx.into_changes()
        };
        assert_eq!(changes.ledger_ops(), 1);
        let Ok(()) = changes.commit(&mut registry, &mut ledger) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.len(), 1);
        assert_eq!(ledger.balance_of(&ASSET, &BOB), Amount::new(10));
        assert_eq!(ledger.allowance(&ASSET, &ALICE, &ROUTER), Amount::new(50));
    }

    #[test]
    fn failed_commit_compensates_and_writes_nothing() {
        let mut registry = PoolRegistry::default();
        let mut ledger = ledger();
        let changes = {
            let mut tx = Transaction::new(&registry, &ledger, ROUTER);
            let Ok(_) = tx.resolve_or_create(ASSET, OTHER) else {
                panic!("expected Ok");
            };
            let (Ok(()), Ok(())) = (
                tx.pull(&ASSET, &ALICE, &BOB, Amount::new(50)),
                tx.pay(&ASSET, &ALICE, &BOB, Amount::new(50)),
            ) else {
                panic!("expected Ok");
            };
            tx.into_changes()
        };
        // the ledger changes underneath the staged transaction
        let Ok(()) = ledger.transfer(&ASSET, &ALICE, &BOB, Amount::new(30)) else {
            panic!("expected Ok");
        };
        let Err(AmmError::Ledger(LedgerError::InsufficientBalance { .. })) =
            changes.commit(&mut registry, &mut ledger)
        else {
            panic!("expected ledger error");
        };
        assert!(registry.is_empty());
        assert_eq!(ledger.balance_of(&ASSET, &ALICE), Amount::new(70));
        assert_eq!(ledger.balance_of(&ASSET, &BOB), Amount::new(30));
        assert_eq!(ledger.allowance(&ASSET, &ALICE, &ROUTER), Amount::new(60));
    }

    #[test]
    fn find_missing_pool() {
        let registry = PoolRegistry::default();
        let ledger = InMemoryLedger::new();
        let tx = Transaction::new(&registry, &ledger, ROUTER);
        assert_eq!(tx.find(ASSET, OTHER), Err(AmmError::PoolNotFound));
        assert_eq!(tx.find(ASSET, ASSET), Err(AmmError::IdenticalAssets));
    }
}
