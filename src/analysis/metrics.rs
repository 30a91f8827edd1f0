//! Strategy aggregation
//!
//! Combines per-position prices and Greeks into strategy-level totals
//! across price/time grids. Every grid cell is computed independently
//! from the strategy's positions; summation order only affects results
//! at floating-point rounding level.
//!
//! P&L convention: the premium is realized at trade time and never
//! re-priced, so the payoff at a grid point is
//! `sum over positions of signed_quantity * (theoretical value - premium)`.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::core::{Greeks, Strategy};
use crate::models::black_scholes;

/// Strategy metrics over a price x time grid
///
/// All arrays are indexed `[price_index, time_index]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyGrid {
    /// Underlying prices (ascending)
    pub prices: Vec<f64>,
    /// Days to expiry for each time slice
    pub days: Vec<f64>,
    pub pnl: Array2<f64>,
    pub delta: Array2<f64>,
    pub gamma: Array2<f64>,
    pub theta: Array2<f64>,
    pub vega: Array2<f64>,
    pub rho: Array2<f64>,
}

/// Strategy metrics along a price grid at a fixed days-to-expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub prices: Vec<f64>,
    pub pnl: Vec<f64>,
    pub delta: Vec<f64>,
    pub gamma: Vec<f64>,
    pub theta: Vec<f64>,
    pub vega: Vec<f64>,
    pub rho: Vec<f64>,
}

/// Strategy P&L and Greeks at one (spot, time) point
pub fn evaluate_at(strategy: &Strategy, spot: f64, time_years: f64) -> (f64, Greeks) {
    let params = strategy.parameters();
    let mut pnl = 0.0;
    let mut totals = Greeks::default();

    for position in strategy.positions() {
        let signed_qty = position.signed_quantity();
        let value = black_scholes::price(
            spot,
            position.strike,
            params.risk_free_rate,
            params.implied_volatility,
            time_years,
            position.kind,
        );
        pnl += signed_qty * (value - position.premium);

        let greeks = black_scholes::greeks(
            spot,
            position.strike,
            params.risk_free_rate,
            params.implied_volatility,
            time_years,
            position.kind,
        );
        totals = totals.add(&greeks.scale(signed_qty));
    }

    (pnl, totals)
}

/// Evaluate a strategy over a price grid and a time grid (days to expiry)
///
/// An empty strategy yields all-zero grids, not an error.
pub fn evaluate(strategy: &Strategy, prices: &[f64], days: &[f64]) -> StrategyGrid {
    let shape = (prices.len(), days.len());
    let mut grid = StrategyGrid {
        prices: prices.to_vec(),
        days: days.to_vec(),
        pnl: Array2::zeros(shape),
        delta: Array2::zeros(shape),
        gamma: Array2::zeros(shape),
        theta: Array2::zeros(shape),
        vega: Array2::zeros(shape),
        rho: Array2::zeros(shape),
    };

    for (pi, &spot) in prices.iter().enumerate() {
        for (ti, &day) in days.iter().enumerate() {
            let time_years = day / 365.0;
            let (pnl, greeks) = evaluate_at(strategy, spot, time_years);

            grid.pnl[[pi, ti]] = pnl;
            grid.delta[[pi, ti]] = greeks.delta;
            grid.gamma[[pi, ti]] = greeks.gamma;
            grid.theta[[pi, ti]] = greeks.theta;
            grid.vega[[pi, ti]] = greeks.vega;
            grid.rho[[pi, ti]] = greeks.rho;
        }
    }

    grid
}

/// Evaluate a strategy along a price grid at its configured days to expiry
pub fn evaluate_profile(strategy: &Strategy, prices: &[f64]) -> StrategyProfile {
    let time_years = strategy.parameters().time_years();
    let n = prices.len();

    let mut profile = StrategyProfile {
        prices: prices.to_vec(),
        pnl: vec![0.0; n],
        delta: vec![0.0; n],
        gamma: vec![0.0; n],
        theta: vec![0.0; n],
        vega: vec![0.0; n],
        rho: vec![0.0; n],
    };

    for (i, &spot) in prices.iter().enumerate() {
        let (pnl, greeks) = evaluate_at(strategy, spot, time_years);
        profile.pnl[i] = pnl;
        profile.delta[i] = greeks.delta;
        profile.gamma[i] = greeks.gamma;
        profile.theta[i] = greeks.theta;
        profile.vega[i] = greeks.vega;
        profile.rho[i] = greeks.rho;
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::grid::{price_grid, time_grid};
    use crate::core::{MarketParameters, OptionContract, OptionKind, PositionSide};

    fn test_strategy() -> Strategy {
        let params = MarketParameters::new(100.0, 0.05, 30, 0.25).unwrap();
        Strategy::new(params).unwrap()
    }

    #[test]
    fn test_empty_strategy_is_all_zeros() {
        let strategy = test_strategy();
        let prices = price_grid(100.0, 0.3, 11);
        let days = time_grid(30, 4);

        let grid = evaluate(&strategy, &prices, &days);
        assert!(grid.pnl.iter().all(|&v| v == 0.0));
        assert!(grid.delta.iter().all(|&v| v == 0.0));
        assert!(grid.gamma.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_aggregation_linearity() {
        let contract =
            OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 2, 5.0).unwrap();
        let single =
            OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 1, 5.0).unwrap();

        let mut doubled_qty = test_strategy();
        doubled_qty.add_position(contract).unwrap();

        let mut two_positions = test_strategy();
        two_positions.add_position(single.clone()).unwrap();
        two_positions.add_position(single).unwrap();

        let prices = price_grid(100.0, 0.3, 21);
        let a = evaluate_profile(&doubled_qty, &prices);
        let b = evaluate_profile(&two_positions, &prices);

        for i in 0..prices.len() {
            assert!((a.pnl[i] - b.pnl[i]).abs() < 1e-9);
            assert!((a.delta[i] - b.delta[i]).abs() < 1e-12);
            assert!((a.gamma[i] - b.gamma[i]).abs() < 1e-12);
            assert!((a.vega[i] - b.vega[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_long_call_pnl_shape() {
        let mut strategy = test_strategy();
        strategy
            .add_position(
                OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 1, 5.0).unwrap(),
            )
            .unwrap();

        let prices = price_grid(100.0, 0.3, 101);
        let profile = evaluate_profile(&strategy, &prices);

        // Deep OTM the long call loses roughly the premium
        assert!(profile.pnl[0] < 0.0);
        assert!(profile.pnl[0] > -5.0 - 1e-9);
        // Deep ITM it profits
        assert!(*profile.pnl.last().unwrap() > 0.0);
        // Delta is monotonically increasing for a single long call
        assert!(profile.delta.windows(2).all(|w| w[0] <= w[1] + 1e-12));
    }

    #[test]
    fn test_short_position_flips_strategy_greeks() {
        let mut long = test_strategy();
        long.add_position(
            OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 1, 5.0).unwrap(),
        )
        .unwrap();

        let mut short = test_strategy();
        short
            .add_position(
                OptionContract::new(OptionKind::Call, PositionSide::Short, 100.0, 1, 5.0).unwrap(),
            )
            .unwrap();

        let (_, gl) = evaluate_at(&long, 100.0, 30.0 / 365.0);
        let (_, gs) = evaluate_at(&short, 100.0, 30.0 / 365.0);

        assert!((gl.delta + gs.delta).abs() < 1e-12);
        assert!(gl.gamma > 0.0);
        assert!(gs.gamma < 0.0);
    }

    #[test]
    fn test_expiry_slice_is_intrinsic_payoff() {
        let mut strategy = test_strategy();
        strategy
            .add_position(
                OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 1, 5.0).unwrap(),
            )
            .unwrap();

        let (pnl, greeks) = evaluate_at(&strategy, 110.0, 0.0);
        assert!((pnl - 5.0).abs() < 1e-12); // intrinsic 10 minus premium 5
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.vega, 0.0);
    }
}
