//! Atomic, slippage- and deadline-checked orchestration.
//!
//! The [`Router`] owns a [`PoolRegistry`], a [`TokenLedger`] and a
//! [`Clock`], and has a ledger account of its own that callers approve as
//! spender. Every mutating call follows the same shape:
//!
//! 1. Read the clock once and reject the call with [`AmmError::Expired`]
//!    if the deadline has passed, before anything else happens.
//! 2. Run the whole operation against a staged transaction.
//! 3. Commit on success, discard on the first error.
//!
//! ```text
//!  caller ──transfer_from──▶ pool₀ ──transfer──▶ pool₁ ──transfer──▶ caller
//!            (router spends        (each hop pays the next pool;
//!             the allowance)        the last hop pays the caller)
//! ```

mod params;
mod transaction;

use tracing::{debug, warn};

use crate::domain::{AccountId, Amount, AssetId, Timestamp};
use crate::error::AmmError;
use crate::events::AmmEvent;
use crate::pool::Pool;
use crate::registry::PoolRegistry;
use crate::traits::{Clock, SystemClock, TokenLedger};

pub use params::{AddLiquidity, LiquidityAdded, LiquidityRemoved, RemoveLiquidity, SwapReceipt};

use transaction::Transaction;

/// The engine's entry point for liquidity and swap operations.
///
/// # Example
///
/// ```rust
/// use pairdex::config::AmmConfig;
/// use pairdex::domain::{AccountId, Amount, AssetId, Shares, Timestamp, FeeTier};
/// use pairdex::ledger::InMemoryLedger;
/// use pairdex::registry::PoolRegistry;
/// use pairdex::router::{AddLiquidity, Router};
/// use pairdex::traits::{ManualClock, TokenLedger};
///
/// let (x, y) = (AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]));
/// let alice = AccountId::from_bytes([0xA1; 32]);
/// let router_account = AccountId::from_bytes([0xEE; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// for asset in [x, y] {
///     ledger.mint(&asset, &alice, Amount::new(1_000_000)).expect("mint");
///     ledger.approve(&asset, &alice, &router_account, Amount::MAX).expect("approve");
/// }
///
/// let config = AmmConfig::new(FeeTier::TIER_0_30_PERCENT, Shares::new(1_000)).expect("valid");
/// let clock = ManualClock::new(Timestamp::new(1_000));
/// let mut router = Router::new(router_account, PoolRegistry::new(config), ledger, clock);
///
/// let added = router
///     .add_liquidity(&alice, AddLiquidity {
///         asset_a: x,
///         asset_b: y,
///         amount_a_desired: Amount::new(100_000),
///         amount_b_desired: Amount::new(100_000),
///         amount_a_min: Amount::ZERO,
///         amount_b_min: Amount::ZERO,
///         deadline: Timestamp::new(1_060),
///     })
///     .expect("add liquidity");
/// assert_eq!(added.shares, Shares::new(99_000));
///
/// let receipt = router
///     .swap_exact_input(&alice, &[x, y], Amount::new(1_000), Amount::new(900), Timestamp::new(1_060))
///     .expect("swap");
/// assert_eq!(receipt.amount_out(), Amount::new(987));
/// ```
#[derive(Debug)]
pub struct Router<L, C = SystemClock> {
    account: AccountId,
    registry: PoolRegistry,
    ledger: L,
    clock: C,
}

impl<L: TokenLedger, C: Clock> Router<L, C> {
    /// Assembles a router acting as `account`.
    #[must_use]
    pub const fn new(account: AccountId, registry: PoolRegistry, ledger: L, clock: C) -> Self {
        Self {
            account,
            registry,
            ledger,
            clock,
        }
    }

    // -- accessors ------------------------------------------------------------

    /// The router's own ledger account, the spender callers approve.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// The pool registry.
    #[must_use]
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// The pool registry, for creating pools or draining events.
    pub fn registry_mut(&mut self) -> &mut PoolRegistry {
        &mut self.registry
    }

    /// The token ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The token ledger, for funding accounts and approvals.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The clock used for deadline checks.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Dismantles the router.
    pub fn into_parts(self) -> (PoolRegistry, L, C) {
        (self.registry, self.ledger, self.clock)
    }

    // -- liquidity -----------------------------------------------------------

    /// Deposits both assets at the pool's current ratio and issues shares
    /// to `caller`, creating the pool if it does not exist.
    ///
    /// An empty pool takes the desired amounts as they are. Otherwise the
    /// router deposits all of `amount_a_desired` with the matching amount
    /// of B if that fits, or else all of `amount_b_desired` with the
    /// matching amount of A.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::IdenticalAssets`] if both assets are equal.
    /// - [`AmmError::InsufficientBAmount`] / [`AmmError::InsufficientAAmount`]
    ///   if the matched amount is below the caller's minimum.
    /// - [`AmmError::Ledger`] if the caller's balance or allowance is short.
    /// - Any [`Pool::mint`] error.
    pub fn add_liquidity(
        &mut self,
        caller: &AccountId,
        params: AddLiquidity,
    ) -> Result<LiquidityAdded, AmmError> {
        self.execute("add_liquidity", params.deadline, |tx| {
            let id = tx.resolve_or_create(params.asset_a, params.asset_b)?;
            let pool = tx.pool(&id)?;
            let (amount_a, amount_b) = optimal_amounts(pool, &params)?;
            let account = pool.account();
            let a_is_0 = pool.pair().is_asset0(&params.asset_a)?;

            tx.pull(&params.asset_a, caller, &account, amount_a)?;
            tx.pull(&params.asset_b, caller, &account, amount_b)?;

            let (amount0, amount1) = if a_is_0 {
                (amount_a, amount_b)
            } else {
                (amount_b, amount_a)
            };
            let shares = tx.pool_mut(&id)?.mint(amount0, amount1, *caller)?;
            tx.emit(AmmEvent::Mint {
                pool: id,
                sender: *caller,
                amount0,
                amount1,
                shares,
            });
            tx.emit_sync(&id)?;

            Ok(LiquidityAdded {
                pool: id,
                amount_a,
                amount_b,
                shares,
            })
        })
    }

    /// Burns `caller`'s shares and pays the released assets to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::PoolNotFound`] if the pair has no pool.
    /// - Any [`Pool::burn`] error.
    /// - [`AmmError::InsufficientAAmount`] / [`AmmError::InsufficientBAmount`]
    ///   if a released amount is below the caller's minimum.
    pub fn remove_liquidity(
        &mut self,
        caller: &AccountId,
        params: RemoveLiquidity,
    ) -> Result<LiquidityRemoved, AmmError> {
        self.execute("remove_liquidity", params.deadline, |tx| {
            let id = tx.find(params.asset_a, params.asset_b)?;
            let pool = tx.pool_mut(&id)?;
            let a_is_0 = pool.pair().is_asset0(&params.asset_a)?;
            let account = pool.account();
            let (amount0, amount1) = pool.burn(params.shares, caller)?;

            let (amount_a, amount_b) = if a_is_0 {
                (amount0, amount1)
            } else {
                (amount1, amount0)
            };
            if amount_a < params.amount_a_min {
                return Err(AmmError::InsufficientAAmount);
            }
            if amount_b < params.amount_b_min {
                return Err(AmmError::InsufficientBAmount);
            }

            tx.pay(&params.asset_a, &account, caller, amount_a)?;
            tx.pay(&params.asset_b, &account, caller, amount_b)?;
            tx.emit(AmmEvent::Burn {
                pool: id,
                sender: *caller,
                amount0,
                amount1,
                shares: params.shares,
            });
            tx.emit_sync(&id)?;

            Ok(LiquidityRemoved {
                pool: id,
                amount_a,
                amount_b,
            })
        })
    }

    // -- swaps ----------------------------------------------------------------

    /// Sells exactly `amount_in` of `path[0]` along `path`, paying the
    /// final output to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`AmmError::PoolNotFound`] if a hop has no pool.
    /// - [`AmmError::InsufficientOutputAmount`] if any hop outputs zero or
    ///   the final output is below `amount_out_min`.
    /// - [`AmmError::Ledger`] if the caller's balance or allowance is short.
    pub fn swap_exact_input(
        &mut self,
        caller: &AccountId,
        path: &[AssetId],
        amount_in: Amount,
        amount_out_min: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt, AmmError> {
        self.execute("swap_exact_input", deadline, |tx| {
            execute_path(tx, caller, path, amount_in, amount_out_min)
        })
    }

    /// Buys at least `amount_out` of the last asset of `path`, paying at
    /// most `amount_in_max` of the first.
    ///
    /// The required input is quoted backwards from `amount_out`, then
    /// traded as an exact input, so the caller may receive slightly more
    /// than `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`AmmError::PoolNotFound`] if a hop has no pool.
    /// - [`AmmError::InsufficientLiquidity`] if a hop cannot supply its output.
    /// - [`AmmError::ExcessiveInputAmount`] if the required input exceeds
    ///   `amount_in_max`.
    pub fn swap_exact_output(
        &mut self,
        caller: &AccountId,
        path: &[AssetId],
        amount_out: Amount,
        amount_in_max: Amount,
        deadline: Timestamp,
    ) -> Result<SwapReceipt, AmmError> {
        self.execute("swap_exact_output", deadline, |tx| {
            let required =
                amounts_in(path, amount_out, |a, b| tx.find(a, b).and_then(|id| tx.pool(&id)))?;
            let amount_in = required.first().copied().ok_or(AmmError::InvalidPath)?;
            if amount_in > amount_in_max {
                return Err(AmmError::ExcessiveInputAmount);
            }
            execute_path(tx, caller, path, amount_in, amount_out)
        })
    }

    // -- quotes ---------------------------------------------------------------

    /// The amount entering each hop of an exact-input trade, then its final
    /// output, at current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`AmmError::PoolNotFound`] if a hop has no pool.
    /// - [`AmmError::InsufficientOutputAmount`] if a hop would output zero.
    pub fn quote_exact_input(
        &self,
        path: &[AssetId],
        amount_in: Amount,
    ) -> Result<Vec<Amount>, AmmError> {
        amounts_out(path, amount_in, |a, b| self.hop_pool(a, b))
    }

    /// The input each hop needs so that the path outputs at least
    /// `amount_out`, ending with `amount_out` itself.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`AmmError::PoolNotFound`] if a hop has no pool.
    /// - [`AmmError::InsufficientLiquidity`] if a hop cannot supply its output.
    pub fn quote_exact_output(
        &self,
        path: &[AssetId],
        amount_out: Amount,
    ) -> Result<Vec<Amount>, AmmError> {
        amounts_in(path, amount_out, |a, b| self.hop_pool(a, b))
    }

    // -- internals ------------------------------------------------------------

    fn hop_pool(&self, asset_a: AssetId, asset_b: AssetId) -> Result<&Pool, AmmError> {
        if asset_a == asset_b {
            return Err(AmmError::IdenticalAssets);
        }
        self.registry
            .pool_for(asset_a, asset_b)
            .ok_or(AmmError::PoolNotFound)
    }

    fn execute<T>(
        &mut self,
        operation: &'static str,
        deadline: Timestamp,
        body: impl FnOnce(&mut Transaction<'_, L>) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let now = self.clock.now();
        if deadline.has_passed(now) {
            warn!(operation, %deadline, %now, "rejected expired call");
            return Err(AmmError::Expired { deadline, now });
        }

        let mut tx = Transaction::new(&self.registry, &self.ledger, self.account);
        let value = match body(&mut tx) {
            Ok(value) => value,
            Err(error) => {
                warn!(operation, %error, "rolled back");
                return Err(error);
            }
        };

        let changes = tx.into_changes();
        let (ops, events) = (changes.ledger_ops(), changes.event_count());
        changes.commit(&mut self.registry, &mut self.ledger)?;
        debug!(operation, ledger_ops = ops, events, "committed");
        Ok(value)
    }
}

/// Deposit amounts for `params` at the pool's current reserves.
fn optimal_amounts(pool: &Pool, params: &AddLiquidity) -> Result<(Amount, Amount), AmmError> {
    let (reserve_a, reserve_b) = pool.reserves_for(&params.asset_a)?;
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((params.amount_a_desired, params.amount_b_desired));
    }

    let amount_b_optimal = pool.quote(params.amount_a_desired, &params.asset_a)?;
    if amount_b_optimal <= params.amount_b_desired {
        if amount_b_optimal < params.amount_b_min {
            return Err(AmmError::InsufficientBAmount);
        }
        return Ok((params.amount_a_desired, amount_b_optimal));
    }

    let amount_a_optimal = pool.quote(params.amount_b_desired, &params.asset_b)?;
    if amount_a_optimal > params.amount_a_desired || amount_a_optimal < params.amount_a_min {
        return Err(AmmError::InsufficientAAmount);
    }
    Ok((amount_a_optimal, params.amount_b_desired))
}

/// Forward amount chain: `amounts[0] = amount_in`, then each hop's output.
fn amounts_out<'p>(
    path: &[AssetId],
    amount_in: Amount,
    pool_for: impl Fn(AssetId, AssetId) -> Result<&'p Pool, AmmError>,
) -> Result<Vec<Amount>, AmmError> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_in);
    let mut current = amount_in;
    for hop in path.windows(2) {
        let [asset_in, asset_out] = [hop[0], hop[1]];
        current = pool_for(asset_in, asset_out)?.quote_amount_out(current, &asset_in)?;
        if current.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        amounts.push(current);
    }
    Ok(amounts)
}

/// Backward amount chain: `amounts[n - 1] = amount_out`, each earlier entry
/// the input its hop needs.
fn amounts_in<'p>(
    path: &[AssetId],
    amount_out: Amount,
    pool_for: impl Fn(AssetId, AssetId) -> Result<&'p Pool, AmmError>,
) -> Result<Vec<Amount>, AmmError> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let mut amounts = vec![Amount::ZERO; path.len()];
    let mut current = amount_out;
    amounts[path.len() - 1] = current;
    for (index, hop) in path.windows(2).enumerate().rev() {
        let [asset_in, asset_out] = [hop[0], hop[1]];
        current = pool_for(asset_in, asset_out)?.quote_amount_in(current, &asset_out)?;
        amounts[index] = current;
    }
    Ok(amounts)
}

/// Pulls `amount_in` from `caller` into the first pool and walks `path`,
/// each hop paying the next pool and the last paying `caller`.
fn execute_path<L: TokenLedger>(
    tx: &mut Transaction<'_, L>,
    caller: &AccountId,
    path: &[AssetId],
    amount_in: Amount,
    amount_out_min: Amount,
) -> Result<SwapReceipt, AmmError> {
    if path.len() < 2 {
        return Err(AmmError::InvalidPath);
    }
    let pool_ids = path
        .windows(2)
        .map(|hop| tx.find(hop[0], hop[1]))
        .collect::<Result<Vec<_>, _>>()?;

    let first_account = tx.pool(&pool_ids[0])?.account();
    tx.pull(&path[0], caller, &first_account, amount_in)?;

    let mut amounts = Vec::with_capacity(path.len());
    let mut hops = Vec::with_capacity(pool_ids.len());
    amounts.push(amount_in);
    let mut current = amount_in;

    for (index, id) in pool_ids.iter().enumerate() {
        let (asset_in, asset_out) = (path[index], path[index + 1]);
        let to = match pool_ids.get(index + 1) {
            Some(next) => tx.pool(next)?.account(),
            None => *caller,
        };
        let pool = tx.pool_mut(id)?;
        let from = pool.account();
        let result = pool.swap(current, &asset_in, Amount::ZERO)?;
        current = result.amount_out();

        tx.pay(&asset_out, &from, &to, current)?;
        tx.emit(AmmEvent::Swap {
            pool: *id,
            sender: *caller,
            asset_in,
            amount_in: result.amount_in(),
            amount_out: current,
            to,
        });
        tx.emit_sync(id)?;
        amounts.push(current);
        hops.push(result);
    }

    if current < amount_out_min {
        return Err(AmmError::InsufficientOutputAmount);
    }
    Ok(SwapReceipt {
        path: path.to_vec(),
        amounts,
        hops,
    })
}
