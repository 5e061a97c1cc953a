//! Constant product pool (`reserve0 · reserve1 = k`).
//!
//! # Swap Algorithm (asset in → asset out)
//!
//! 1. `fee = ceil(amount_in × fee_bps / 10 000)`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = floor(reserve_out × net_input / (reserve_in + net_input))`
//! 4. `reserve_in += amount_in` (fee stays in the pool)
//! 5. `reserve_out -= amount_out`
//!
//! # Shares
//!
//! The first deposit mints `floor(√(amount0 × amount1))` shares, of which
//! `minimum_liquidity` are credited to the lock account
//! [`AccountId::ZERO`] and can never be burned. Later deposits mint
//! `min(amount0 × total / reserve0, amount1 × total / reserve1)`.
//!
//! # Invariant
//!
//! After every swap `k_after ≥ k_before`, compared in 256 bits.
//!
//! Every mutating method computes all new field values first and writes
//! them only once every check has passed, so an `Err` leaves the pool
//! exactly as it was.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::AmmConfig;
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, FeeTier, LiquidityPosition, PoolId, Rounding, Shares,
    SwapResult, BPS_DENOMINATOR,
};
use crate::error::AmmError;
use crate::math::{mul_div, narrow, product, sqrt_product, CheckedArithmetic, U256};

/// One liquidity pool for a canonical asset pair.
///
/// Pools are created empty by the
/// [`PoolRegistry`](crate::registry::PoolRegistry) and are mutated only
/// through [`mint`](Self::mint), [`burn`](Self::burn) and
/// [`swap`](Self::swap). The pool accounts its reserves; the tokens
/// themselves sit in the ledger under the pool's custody
/// [`account`](Self::account).
///
/// # Example
///
/// ```rust
/// use pairdex::config::AmmConfig;
/// use pairdex::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, Shares};
/// use pairdex::pool::Pool;
///
/// let x = AssetId::from_bytes([1u8; 32]);
/// let y = AssetId::from_bytes([2u8; 32]);
/// let pair = AssetPair::new(x, y).expect("distinct");
/// let config = AmmConfig::new(FeeTier::TIER_0_30_PERCENT, Shares::new(16)).expect("valid");
/// let alice = AccountId::from_bytes([7u8; 32]);
///
/// let mut pool = Pool::new(pair, &config);
/// let minted = pool.mint(Amount::new(10_000), Amount::new(10), alice).expect("mint");
/// assert_eq!(minted, Shares::new(300));
///
/// // fee = 1, net = 4, out = floor(10_000 * 4 / 14)
/// let result = pool.swap(Amount::new(5), &y, Amount::ZERO).expect("swap");
/// assert_eq!(result.amount_out(), Amount::new(2_857));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    id: PoolId,
    pair: AssetPair,
    fee_tier: FeeTier,
    minimum_liquidity: Shares,
    reserve0: Amount,
    reserve1: Amount,
    total_shares: Shares,
    share_balances: BTreeMap<AccountId, Shares>,
    last_synced_at: u64,
    accumulated_fees0: Amount,
    accumulated_fees1: Amount,
}

impl Pool {
    /// Creates an empty pool for `pair` with the fee and lock of `config`.
    #[must_use]
    pub fn new(pair: AssetPair, config: &AmmConfig) -> Self {
        Self {
            id: PoolId::derive(&pair),
            pair,
            fee_tier: config.fee_tier(),
            minimum_liquidity: config.minimum_liquidity(),
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            total_shares: Shares::ZERO,
            share_balances: BTreeMap::new(),
            last_synced_at: 0,
            accumulated_fees0: Amount::ZERO,
            accumulated_fees1: Amount::ZERO,
        }
    }

    // -- accessors ------------------------------------------------------------

    /// The pool's content address.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// The ledger account holding this pool's reserves.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.id.account()
    }

    /// The canonical pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// The lower-ordered asset.
    #[must_use]
    pub const fn asset0(&self) -> AssetId {
        self.pair.asset0()
    }

    /// The higher-ordered asset.
    #[must_use]
    pub const fn asset1(&self) -> AssetId {
        self.pair.asset1()
    }

    /// The reserve of `asset0`.
    #[must_use]
    pub const fn reserve0(&self) -> Amount {
        self.reserve0
    }

    /// The reserve of `asset1`.
    #[must_use]
    pub const fn reserve1(&self) -> Amount {
        self.reserve1
    }

    /// Outstanding shares, the locked minimum included.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn share_balance(&self, owner: &AccountId) -> Shares {
        self.share_balances
            .get(owner)
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    /// Every non-zero share balance, ordered by account.
    pub fn share_balances(&self) -> impl Iterator<Item = (&AccountId, &Shares)> {
        self.share_balances.iter()
    }

    /// The swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Shares locked by the first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Shares {
        self.minimum_liquidity
    }

    /// Number of reserve updates since creation. Saturates at `u64::MAX`.
    #[must_use]
    pub const fn last_synced_at(&self) -> u64 {
        self.last_synced_at
    }

    /// Lifetime swap fees collected in `asset0`.
    #[must_use]
    pub const fn accumulated_fees0(&self) -> Amount {
        self.accumulated_fees0
    }

    /// Lifetime swap fees collected in `asset1`.
    #[must_use]
    pub const fn accumulated_fees1(&self) -> Amount {
        self.accumulated_fees1
    }

    /// The reserve product `k`, in 256 bits.
    #[must_use]
    pub fn invariant(&self) -> U256 {
        product(self.reserve0.get(), self.reserve1.get())
    }

    /// `(reserve of asset, reserve of the other asset)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn reserves_for(&self, asset: &AssetId) -> Result<(Amount, Amount), AmmError> {
        if self.pair.is_asset0(asset)? {
            Ok((self.reserve0, self.reserve1))
        } else {
            Ok((self.reserve1, self.reserve0))
        }
    }

    /// `owner`'s shares and what burning all of them would pay out now.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only if the pool's own bookkeeping is
    /// corrupt.
    pub fn position(&self, owner: &AccountId) -> Result<LiquidityPosition, AmmError> {
        let shares = self.share_balance(owner);
        let (amount0, amount1) = if self.total_shares.is_zero() {
            (Amount::ZERO, Amount::ZERO)
        } else {
            self.redeemable(shares)?
        };
        Ok(LiquidityPosition {
            owner: *owner,
            shares,
            total_shares: self.total_shares,
            amount0,
            amount1,
        })
    }

    // -- quotes ---------------------------------------------------------------

    /// Output of selling `amount_in` of `asset_in` at current reserves.
    ///
    /// May be zero for dust inputs; [`swap`](Self::swap) rejects that.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not in the pair.
    /// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    pub fn quote_amount_out(
        &self,
        amount_in: Amount,
        asset_in: &AssetId,
    ) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.reserves_for(asset_in)?;
        let (amount_out, _fee) = self.compute_exact_in(amount_in, reserve_in, reserve_out)?;
        Ok(amount_out)
    }

    /// Input of the other asset needed to receive at least `amount_out` of
    /// `asset_out`.
    ///
    /// Formula, both steps rounded up:
    /// `net = reserve_in × amount_out / (reserve_out − amount_out)`, then
    /// `amount_in = net × 10 000 / (10 000 − fee_bps)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_out` is not in the pair.
    /// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero or
    ///   `amount_out` is not below the output reserve.
    pub fn quote_amount_in(
        &self,
        amount_out: Amount,
        asset_out: &AssetId,
    ) -> Result<Amount, AmmError> {
        let (reserve_out, reserve_in) = self.reserves_for(asset_out)?;
        self.compute_exact_out(amount_out, reserve_in, reserve_out)
    }

    /// Amount of the other asset worth `amount` of `asset` at the current
    /// reserve ratio, rounded down. No fee, no price impact.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    /// - [`AmmError::InsufficientInputAmount`] if `amount` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    pub fn quote(&self, amount: Amount, asset: &AssetId) -> Result<Amount, AmmError> {
        let (reserve_a, reserve_b) = self.reserves_for(asset)?;
        if amount.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        mul_div(amount.get(), reserve_b.get(), reserve_a.get(), Rounding::Down).map(Amount::new)
    }

    // -- mutations ------------------------------------------------------------

    /// Deposits `amount0`/`amount1` (already credited to the pool account)
    /// and issues shares to `recipient`.
    ///
    /// Excess of one side in a skewed deposit stays in the pool as a
    /// donation to existing holders.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityMinted`] if a first deposit has a
    ///   zero side, its root does not exceed the minimum, or the issue
    ///   rounds to zero.
    /// - [`AmmError::Overflow`] if a reserve or the share total overflows.
    pub fn mint(
        &mut self,
        amount0: Amount,
        amount1: Amount,
        recipient: AccountId,
    ) -> Result<Shares, AmmError> {
        let (minted, locked) = if self.total_shares.is_zero() {
            if amount0.is_zero() || amount1.is_zero() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            let root = Shares::new(sqrt_product(amount0.get(), amount1.get()));
            if root <= self.minimum_liquidity {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            (root.safe_sub(&self.minimum_liquidity)?, self.minimum_liquidity)
        } else {
            let total = self.total_shares.get();
            let by0 = mul_div(amount0.get(), total, self.reserve0.get(), Rounding::Down)?;
            let by1 = mul_div(amount1.get(), total, self.reserve1.get(), Rounding::Down)?;
            (Shares::new(by0.min(by1)), Shares::ZERO)
        };
        if minted.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }

        let reserve0 = self.reserve0.safe_add(&amount0)?;
        let reserve1 = self.reserve1.safe_add(&amount1)?;
        let total_shares = self.total_shares.safe_add(&minted)?.safe_add(&locked)?;
        let lock_balance = self.share_balance(&AccountId::ZERO).safe_add(&locked)?;
        let recipient_balance = if recipient.is_zero() {
            lock_balance.safe_add(&minted)?
        } else {
            self.share_balance(&recipient).safe_add(&minted)?
        };

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.total_shares = total_shares;
        if !locked.is_zero() {
            self.share_balances.insert(AccountId::ZERO, lock_balance);
        }
        self.share_balances.insert(recipient, recipient_balance);
        self.sync();

        debug!(
            pool = %self.id,
            recipient = %recipient,
            %amount0,
            %amount1,
            shares = %minted,
            locked = %locked,
            "minted liquidity"
        );
        Ok(minted)
    }

    /// Burns `shares` of `owner` and releases the proportional reserves,
    /// each rounded down.
    ///
    /// The caller is responsible for paying the returned amounts out of the
    /// pool account.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `shares` is zero, exceeds
    ///   `owner`'s balance, or `owner` is the lock account.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either released
    ///   amount rounds to zero.
    pub fn burn(
        &mut self,
        shares: Shares,
        owner: &AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        let balance = self.share_balance(owner);
        if owner.is_zero() || shares.is_zero() || shares > balance {
            return Err(AmmError::InsufficientShares);
        }

        let (amount0, amount1) = self.redeemable(shares)?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }

        let reserve0 = self.reserve0.safe_sub(&amount0)?;
        let reserve1 = self.reserve1.safe_sub(&amount1)?;
        let total_shares = self.total_shares.safe_sub(&shares)?;
        let owner_balance = balance.safe_sub(&shares)?;

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.total_shares = total_shares;
        if owner_balance.is_zero() {
            self.share_balances.remove(owner);
        } else {
            self.share_balances.insert(*owner, owner_balance);
        }
        self.sync();

        debug!(
            pool = %self.id,
            owner = %owner,
            %shares,
            %amount0,
            %amount1,
            "burned liquidity"
        );
        Ok((amount0, amount1))
    }

    /// Sells `amount_in` of `asset_in` (already credited to the pool
    /// account) for the other asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not in the pair.
    /// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`AmmError::InsufficientOutputAmount`] if the output is zero or
    ///   below `min_amount_out`.
    /// - [`AmmError::InvariantViolation`] if `k` would decrease.
    pub fn swap(
        &mut self,
        amount_in: Amount,
        asset_in: &AssetId,
        min_amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let is_0_to_1 = self.pair.is_asset0(asset_in)?;
        let (reserve_in, reserve_out) = if is_0_to_1 {
            (self.reserve0, self.reserve1)
        } else {
            (self.reserve1, self.reserve0)
        };

        let (amount_out, fee) = self.compute_exact_in(amount_in, reserve_in, reserve_out)?;
        if amount_out.is_zero() || amount_out < min_amount_out {
            return Err(AmmError::InsufficientOutputAmount);
        }

        let new_reserve_in = reserve_in.safe_add(&amount_in)?;
        let new_reserve_out = reserve_out.safe_sub(&amount_out)?;
        let k_before = product(reserve_in.get(), reserve_out.get());
        let k_after = product(new_reserve_in.get(), new_reserve_out.get());
        if k_after < k_before {
            return Err(AmmError::InvariantViolation);
        }

        let asset_out = self.pair.other(asset_in)?;
        if is_0_to_1 {
            let fees = self.accumulated_fees0.safe_add(&fee)?;
            self.reserve0 = new_reserve_in;
            self.reserve1 = new_reserve_out;
            self.accumulated_fees0 = fees;
        } else {
            let fees = self.accumulated_fees1.safe_add(&fee)?;
            self.reserve1 = new_reserve_in;
            self.reserve0 = new_reserve_out;
            self.accumulated_fees1 = fees;
        }
        self.sync();

        debug!(
            pool = %self.id,
            asset_in = %asset_in,
            %amount_in,
            %amount_out,
            %fee,
            "swapped"
        );
        Ok(SwapResult::new(*asset_in, asset_out, amount_in, amount_out, fee))
    }

    // -- internals ------------------------------------------------------------

    fn sync(&mut self) {
        self.last_synced_at = self.last_synced_at.saturating_add(1);
    }

    /// `floor(reserve_i × shares / total_shares)` for both reserves.
    fn redeemable(&self, shares: Shares) -> Result<(Amount, Amount), AmmError> {
        let total = self.total_shares.get();
        let amount0 = mul_div(self.reserve0.get(), shares.get(), total, Rounding::Down)?;
        let amount1 = mul_div(self.reserve1.get(), shares.get(), total, Rounding::Down)?;
        Ok((Amount::new(amount0), Amount::new(amount1)))
    }

    /// Returns `(amount_out, fee)` for an exact input.
    fn compute_exact_in(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let (net_input, fee) = self.fee_tier.split_input(amount_in)?;
        if net_input.is_zero() {
            return Ok((Amount::ZERO, fee));
        }

        let denominator = reserve_in.safe_add(&net_input)?;
        let amount_out = mul_div(
            reserve_out.get(),
            net_input.get(),
            denominator.get(),
            Rounding::Down,
        )?;
        Ok((Amount::new(amount_out), fee))
    }

    /// Returns the gross input needed for an exact output.
    fn compute_exact_out(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, AmmError> {
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let remaining = reserve_out.safe_sub(&amount_out)?;
        let net_input = mul_div(reserve_in.get(), amount_out.get(), remaining.get(), Rounding::Up)?;

        let complement = self
            .fee_tier
            .basis_points()
            .complement()
            .filter(|c| c.get() > 0)
            .ok_or(AmmError::InvalidConfiguration("fee must be below 10000 basis points"))?;

        let scaled = product(net_input, u128::from(BPS_DENOMINATOR));
        let divisor = U256::from(complement.get());
        let mut gross = scaled / divisor;
        if !(scaled % divisor).is_zero() {
            gross += U256::one();
        }
        narrow(gross)
            .map(Amount::new)
            .ok_or(AmmError::Overflow("exact-out input exceeds u128"))
    }
}
