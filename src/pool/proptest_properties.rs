//! Property-based tests using `proptest` for pool and router invariants.
//!
//! 1. **Canonical ordering**: argument order never changes a pair or its id.
//! 2. **Invariant monotonicity**: `k` never decreases across swaps.
//! 3. **Share conservation**: share balances always sum to the total.
//! 4. **Round-trip bound**: mint then burn never returns more than deposited.
//! 5. **Exact-output cover**: the quoted input buys at least the output.
//! 6. **Multi-hop atomicity**: a failed route leaves every pool and
//!    balance untouched.

use proptest::prelude::*;

use crate::config::AmmConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetPair, FeeTier, PoolId, Shares, Timestamp};
use crate::error::AmmError;
use crate::ledger::InMemoryLedger;
use crate::pool::Pool;
use crate::registry::PoolRegistry;
use crate::router::{AddLiquidity, Router};
use crate::traits::{ManualClock, TokenLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const X: AssetId = AssetId::from_bytes([1u8; 32]);
const Y: AssetId = AssetId::from_bytes([2u8; 32]);
const Z: AssetId = AssetId::from_bytes([3u8; 32]);
const ALICE: AccountId = AccountId::from_bytes([0xA1; 32]);
const BOB: AccountId = AccountId::from_bytes([0xB0; 32]);
const ROUTER: AccountId = AccountId::from_bytes([0xEE; 32]);

fn config(fee_bps: u32) -> AmmConfig {
    let Ok(cfg) = AmmConfig::new(
        FeeTier::new(crate::domain::BasisPoints::new(fee_bps)),
        Shares::new(1_000),
    ) else {
        panic!("valid config");
    };
    cfg
}

fn seeded_pool(r0: u128, r1: u128, fee_bps: u32) -> Pool {
    let Ok(pair) = AssetPair::new(X, Y) else {
        panic!("distinct assets");
    };
    let mut pool = Pool::new(pair, &config(fee_bps));
    let Ok(_) = pool.mint(Amount::new(r0), Amount::new(r1), ALICE) else {
        panic!("seed mint");
    };
    pool
}

fn share_sum(pool: &Pool) -> u128 {
    pool.share_balances().map(|(_, s)| s.get()).sum()
}

fn funded_router() -> Router<InMemoryLedger, ManualClock> {
    let mut ledger = InMemoryLedger::new();
    for account in [ALICE, BOB] {
        for asset in [X, Y, Z] {
            let (Ok(()), Ok(())) = (
                ledger.mint(&asset, &account, Amount::new(u128::from(u64::MAX))),
                ledger.approve(&asset, &account, &ROUTER, Amount::MAX),
            ) else {
                panic!("funding");
            };
        }
    }
    Router::new(
        ROUTER,
        PoolRegistry::new(config(30)),
        ledger,
        ManualClock::new(Timestamp::new(0)),
    )
}

fn seed(router: &mut Router<InMemoryLedger, ManualClock>, a: AssetId, b: AssetId, ra: u128, rb: u128) {
    let params = AddLiquidity {
        asset_a: a,
        asset_b: b,
        amount_a_desired: Amount::new(ra),
        amount_b_desired: Amount::new(rb),
        amount_a_min: Amount::ZERO,
        amount_b_min: Amount::ZERO,
        deadline: Timestamp::MAX,
    };
    let Ok(_) = router.add_liquidity(&ALICE, params) else {
        panic!("seed liquidity");
    };
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10^24], wide enough to need 256-bit products.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        10_000u128..=10_000_000u128,
        10u128.pow(18)..=10u128.pow(24),
    ]
}

/// Swap inputs up to 3e38, past the point where `amount * fee_bps`
/// leaves `u128`.
fn swap_amount_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        1u128..=10u128.pow(20),
        10u128.pow(37)..=3 * 10u128.pow(38),
    ]
}

fn asset_strategy() -> impl Strategy<Value = AssetId> {
    any::<[u8; 32]>().prop_map(AssetId::from_bytes)
}

#[derive(Debug, Clone)]
enum Op {
    Mint(u128, u128),
    Burn(u128),
    Swap(bool, u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u128..=1_000_000u128, 1u128..=1_000_000u128).prop_map(|(a, b)| Op::Mint(a, b)),
        (1u128..=1_000_000u128).prop_map(Op::Burn),
        (any::<bool>(), 1u128..=1_000_000u128).prop_map(|(d, a)| Op::Swap(d, a)),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Canonical ordering
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_canonical_ordering(a in asset_strategy(), b in asset_strategy()) {
        prop_assume!(a != b);
        let (Ok(ab), Ok(ba)) = (AssetPair::new(a, b), AssetPair::new(b, a)) else {
            panic!("distinct assets");
        };
        prop_assert_eq!(ab, ba);
        prop_assert!(ab.asset0() < ab.asset1());
        prop_assert_eq!(PoolId::derive(&ab), PoolId::derive(&ba));

        let mut registry = PoolRegistry::default();
        let (Ok(first), Ok(second)) = (registry.resolve_or_create(a, b), registry.resolve_or_create(b, a)) else {
            panic!("resolve");
        };
        prop_assert_eq!(first, second);
        prop_assert_eq!(registry.len(), 1);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_never_decreases(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee_bps in 0u32..=1_000u32,
        swaps in prop::collection::vec((any::<bool>(), swap_amount_strategy()), 1..12),
    ) {
        let mut pool = seeded_pool(r0, r1, fee_bps);
        for (zero_for_one, amount) in swaps {
            let asset_in = if zero_for_one { X } else { Y };
            let k_before = pool.invariant();
            let snapshot = pool.clone();
            let Ok((reserve_in, _)) = pool.reserves_for(&asset_in) else {
                panic!("pool asset");
            };
            let fees_in = if zero_for_one {
                pool.accumulated_fees0()
            } else {
                pool.accumulated_fees1()
            };
            let fits = reserve_in.get().checked_add(amount).is_some()
                && fees_in.get().checked_add(amount).is_some();
            match pool.swap(Amount::new(amount), &asset_in, Amount::ZERO) {
                Ok(_) => prop_assert!(pool.invariant() >= k_before),
                Err(AmmError::Overflow(msg)) => {
                    prop_assert!(!fits, "overflow with room in reserve: {}", msg);
                    prop_assert_eq!(&pool, &snapshot);
                }
                Err(_) => prop_assert_eq!(&pool, &snapshot),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Share conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_share_conservation(
        r0 in 10_000u128..=10_000_000u128,
        r1 in 10_000u128..=10_000_000u128,
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let mut pool = seeded_pool(r0, r1, 30);
        for op in ops {
            let _ = match op {
                Op::Mint(a, b) => pool.mint(Amount::new(a), Amount::new(b), BOB).map(|_| ()),
                Op::Burn(s) => pool.burn(Shares::new(s), &BOB).map(|_| ()),
                Op::Swap(d, a) => {
                    let asset_in = if d { X } else { Y };
                    pool.swap(Amount::new(a), &asset_in, Amount::ZERO).map(|_| ())
                }
            };
            prop_assert_eq!(share_sum(&pool), pool.total_shares().get());
            prop_assert!(pool.share_balance(&AccountId::ZERO) >= Shares::new(1_000));
            prop_assert!(!pool.reserve0().is_zero() && !pool.reserve1().is_zero());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Round-trip bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_burn_never_profits(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a0 in 1u128..=10u128.pow(22),
        a1 in 1u128..=10u128.pow(22),
    ) {
        let mut pool = seeded_pool(r0, r1, 30);
        let Ok(minted) = pool.mint(Amount::new(a0), Amount::new(a1), BOB) else {
            return Ok(());
        };
        let Ok((out0, out1)) = pool.burn(minted, &BOB) else {
            return Ok(());
        };
        prop_assert!(out0.get() <= a0, "asset0 out {} > in {}", out0, a0);
        prop_assert!(out1.get() <= a1, "asset1 out {} > in {}", out1, a1);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Exact-output cover
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_amount_in_covers_output(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee_bps in 0u32..=1_000u32,
        fraction in 1u128..=999u128,
    ) {
        let pool = seeded_pool(r0, r1, fee_bps);
        let wanted = Amount::new((r1 / 1_000 * fraction).max(1));
        let Ok(needed) = pool.quote_amount_in(wanted, &Y) else {
            return Ok(());
        };
        let Ok(received) = pool.quote_amount_out(needed, &X) else {
            return Ok(());
        };
        prop_assert!(received >= wanted, "received {} < wanted {}", received, wanted);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Multi-hop atomicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_multi_hop_all_or_nothing(
        rxy in 100_000u128..=10_000_000u128,
        ryz in 100_000u128..=10_000_000u128,
        amount_in in 1u128..=1_000_000u128,
        amount_out_min in 0u128..=2_000_000u128,
    ) {
        let mut router = funded_router();
        seed(&mut router, X, Y, rxy, rxy);
        seed(&mut router, Y, Z, ryz, ryz * 2);

        let registry = router.registry().clone();
        let ledger = router.ledger().clone();
        let result = router.swap_exact_input(
            &BOB,
            &[X, Y, Z],
            Amount::new(amount_in),
            Amount::new(amount_out_min),
            Timestamp::MAX,
        );
        match result {
            Ok(receipt) => {
                prop_assert!(receipt.amount_out().get() >= amount_out_min);
                let Some(xy) = router.registry().pool_for(X, Y) else {
                    panic!("pool exists");
                };
                prop_assert_eq!(
                    router.ledger().balance_of(&X, &xy.account()),
                    xy.reserve0()
                );
            }
            Err(_) => {
                prop_assert_eq!(router.registry(), &registry);
                prop_assert_eq!(router.ledger(), &ledger);
            }
        }
    }
}
