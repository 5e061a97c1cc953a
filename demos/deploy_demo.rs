//! Deep-pool deployment demo.
//!
//! Issues four test assets (SWX, GOX, EGC, USDT), creates one pool per
//! asset against USDT, and seeds each with a thousand typical trades of
//! depth at a fixed USDT price, then makes one typical trade per pool to
//! show the price impact stays small.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pairdex=debug cargo run --example deploy_demo
//! ```

use pairdex::prelude::*;
use tracing_subscriber::EnvFilter;

/// 18-decimal base units per whole token.
const WAD: u128 = 1_000_000_000_000_000_000;
/// Prices are given in millionths of a USDT.
const PRICE_SCALE: u128 = 1_000_000;

const INITIAL_SUPPLY: u128 = 10_000_000_000 * WAD;
const TRADE_AMOUNT: u128 = 10_000 * WAD;
const POOL_DEPTH_MULTIPLIER: u128 = 1_000;

/// Symbol and USDT price in millionths.
const PAIRS: [(&str, u128); 3] = [("SWX", 1_000), ("GOX", 10_000), ("EGC", 1_000_000)];

fn asset(symbol: &str) -> AssetId {
    AssetId::from_bytes(*blake3::hash(symbol.as_bytes()).as_bytes())
}

fn format_units(amount: Amount) -> String {
    let whole = amount.get() / WAD;
    let frac = amount.get() % WAD;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:018}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== pairdex deep-pool deployment ===\n");

    // ── 1. Issue test assets to the deployer ────────────────────────────
    let deployer = AccountId::from_bytes(*blake3::hash(b"deployer").as_bytes());
    let mut ledger = InMemoryLedger::new();
    let usdt = asset("USDT");
    for symbol in ["SWX", "GOX", "EGC", "USDT"] {
        let id = asset(symbol);
        ledger.mint(&id, &deployer, Amount::new(INITIAL_SUPPLY))?;
        println!("{symbol:>4} issued: {id}");
    }

    // ── 2. Build the registry and router ────────────────────────────────
    let config = AmmConfig::default();
    let router_account = AccountId::from_bytes(*blake3::hash(b"router").as_bytes());
    let mut router =
        Router::new(router_account, PoolRegistry::new(config), ledger, SystemClock);
    println!("\nRouter account: {router_account}");
    println!("Config: {config}");

    // ── 3. Create and seed each pair against USDT ───────────────────────
    let deadline = router.clock().now().saturating_add(600);
    for (symbol, price) in PAIRS {
        let base = asset(symbol);
        let reserve_in = Amount::new(TRADE_AMOUNT * POOL_DEPTH_MULTIPLIER);
        let reserve_out = Amount::new(reserve_in.get() * price / PRICE_SCALE);

        println!("\nPair {symbol}/USDT needs:");
        println!(" - {symbol}: {}", format_units(reserve_in));
        println!(" - USDT: {}", format_units(reserve_out));

        let id = router.registry_mut().resolve_or_create(base, usdt)?;
        println!("Pair {symbol}/USDT created: {id}");

        router.ledger_mut().approve(&base, &deployer, &router_account, reserve_in)?;
        router.ledger_mut().approve(&usdt, &deployer, &router_account, reserve_out)?;

        let added = router.add_liquidity(
            &deployer,
            AddLiquidity {
                asset_a: base,
                asset_b: usdt,
                amount_a_desired: reserve_in,
                amount_b_desired: reserve_out,
                amount_a_min: reserve_in,
                amount_b_min: reserve_out,
                deadline,
            },
        )?;
        println!("Liquidity added to {symbol}/USDT: {} shares", added.shares);
    }

    // ── 4. One typical trade per pool ───────────────────────────────────
    println!(
        "\n--- Typical trade: {} of each asset -> USDT ---",
        format_units(Amount::new(TRADE_AMOUNT))
    );
    for (symbol, price) in PAIRS {
        let base = asset(symbol);
        let amount_in = Amount::new(TRADE_AMOUNT);
        router.ledger_mut().approve(&base, &deployer, &router_account, amount_in)?;

        let quoted = router.quote_exact_input(&[base, usdt], amount_in)?;
        let ideal = TRADE_AMOUNT * price / PRICE_SCALE;
        let receipt =
            router.swap_exact_input(&deployer, &[base, usdt], amount_in, quoted[1], deadline)?;
        let out = receipt.amount_out().get();
        let impact_bps = (ideal - out) * 10_000 / ideal;

        println!(
            "{symbol:>4}: received {} USDT (ideal {}), {impact_bps} bp below spot incl. fee",
            format_units(receipt.amount_out()),
            format_units(Amount::new(ideal)),
        );
    }

    // ── 5. Final state ──────────────────────────────────────────────────
    println!("\n--- Pools ---");
    for pool in router.registry().pools() {
        let (base, quote) = if pool.asset0() == usdt {
            (pool.reserve1(), pool.reserve0())
        } else {
            (pool.reserve0(), pool.reserve1())
        };
        println!(
            "{}: base {} / USDT {} / fees {} + {}",
            pool.id(),
            format_units(base),
            format_units(quote),
            pool.accumulated_fees0(),
            pool.accumulated_fees1(),
        );
    }
    println!("\nEvents committed: {}", router.registry().events().len());
    println!("\n=== Deployment complete ===");
    Ok(())
}
