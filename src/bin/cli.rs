//! Options Analyzer CLI
//!
//! Command-line walkthrough of the engine: prices a straddle, prints
//! strategy Greeks, sweeps the gamma surface and runs a statement
//! import end to end.

use options_analyzer::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Options Strategy Analyzer");
    println!("=========================\n");

    // Example: ATM straddle on the default market parameters
    let params = MarketParameters::default();
    println!("Market Parameters:");
    println!("  Underlying: {:.0}", params.underlying_price);
    println!("  Rate: {:.1}%", params.risk_free_rate * 100.0);
    println!("  Days to expiry: {}", params.days_to_expiry);
    println!("  IV: {:.0}%\n", params.implied_volatility * 100.0);

    let mut strategy = Strategy::new(params).expect("valid default parameters");
    let strike = 26000.0;

    let call_premium = bs_price(
        params.underlying_price,
        strike,
        params.risk_free_rate,
        params.implied_volatility,
        params.time_years(),
        OptionKind::Call,
    );
    let put_premium = bs_price(
        params.underlying_price,
        strike,
        params.risk_free_rate,
        params.implied_volatility,
        params.time_years(),
        OptionKind::Put,
    );

    println!("Theoretical Premiums (strike {strike:.0}):");
    println!("  Call: {call_premium:.2}");
    println!("  Put: {put_premium:.2}\n");

    strategy
        .add_position(
            OptionContract::new(OptionKind::Call, PositionSide::Long, strike, 1, call_premium)
                .expect("valid contract"),
        )
        .expect("valid position");
    strategy
        .add_position(
            OptionContract::new(OptionKind::Put, PositionSide::Long, strike, 1, put_premium)
                .expect("valid contract"),
        )
        .expect("valid position");

    // Strategy Greeks at the current spot
    let (pnl, greeks) = evaluate_at(&strategy, params.underlying_price, params.time_years());
    println!("Straddle at current spot:");
    println!("  P&L: {pnl:.2}");
    println!("  Delta: {:.4}", greeks.delta);
    println!("  Gamma: {:.6}", greeks.gamma);
    println!("  Theta: {:.2}/day", greeks.theta);
    println!("  Vega: {:.2}", greeks.vega);

    // P&L profile over the default price grid
    let config = GridConfig::default();
    let prices = price_grid(params.underlying_price, config.price_span, config.price_steps);
    let profile = evaluate_profile(&strategy, &prices);

    let max_loss = profile.pnl.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_profit = profile.pnl.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    println!("\nP&L over ±{:.0}% price range:", config.price_span * 100.0);
    println!("  Max loss: {max_loss:.2}");
    println!("  Max profit: {max_profit:.2}");

    // Gamma surface sweep
    let surface = default_gamma_surface(&strategy, &config);
    println!(
        "\nGamma surface: {} strikes x {} tenors",
        surface.strikes.len(),
        surface.days.len()
    );

    // Transaction import walkthrough
    println!("\n--- Statement Import ---");
    let rows = vec![
        StatementRow {
            date: "1403/01/15".into(),
            description: "خرید 10 سهم ضهرم0120 به نرخ 1,250".into(),
            debit: Some(12500.0),
            credit: None,
            balance: Some(87500.0),
        },
        StatementRow {
            date: "1403/01/16".into(),
            description: "واریز سود سهام".into(),
            debit: None,
            credit: Some(3000.0),
            balance: Some(90500.0),
        },
        StatementRow {
            date: "1403/01/17".into(),
            description: "فروش 4 سهم ضهرم0120 به نرخ 1,400".into(),
            debit: None,
            credit: Some(5600.0),
            balance: Some(96100.0),
        },
    ];

    let report = import_statement(&rows);
    println!(
        "Parsed {} trades, {} rows did not match",
        report.trades.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        println!(
            "  row {}: {} ({})",
            failure.row_index, failure.row.description, failure.reason
        );
    }

    let net = reconcile(&report.trades);
    for position in &net {
        println!(
            "  {}: {:?} {} @ {:.2}",
            position.symbol, position.side, position.quantity, position.average_price
        );
    }

    let contracts = positions_from_net(&net, &StrikeMapping::default());
    println!("Imported {} strategy position(s)", contracts.len());

    println!("\n--- Done ---");
}
