//! Derived surfaces and chart series
//!
//! Builds the analysis surfaces the charts consume:
//! - Gamma over strike x days-to-expiry
//! - Gamma/Theta ratio along a price grid
//! - Normalized all-Greeks comparison
//!
//! Ratio convention: cells where |theta| falls below [`THETA_EPSILON`]
//! are reported as `f64::NAN` so a degenerate denominator never turns
//! into a silent infinity downstream. Consumers treat NaN as "no value".

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::analysis::grid::{self, GridConfig};
use crate::analysis::metrics::StrategyProfile;
use crate::core::{OptionKind, Strategy};
use crate::models::black_scholes;

/// Threshold below which |theta| counts as zero in ratio surfaces
pub const THETA_EPSILON: f64 = 1e-10;

/// Gamma surface over strike x days-to-expiry
///
/// Indexed `[strike_index, time_index]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GammaSurface {
    pub strikes: Vec<f64>,
    pub days: Vec<f64>,
    pub gamma: Array2<f64>,
}

/// One Greek series rescaled for comparison plotting
///
/// `values * scale` recovers the original series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub values: Vec<f64>,
    pub scale: f64,
}

/// All Greek series of a profile, each scaled by its own max-abs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreeksComparison {
    pub prices: Vec<f64>,
    pub delta: NormalizedSeries,
    pub gamma: NormalizedSeries,
    pub theta: NormalizedSeries,
    pub vega: NormalizedSeries,
}

/// Gamma for each (strike, day) combination at the strategy's market
/// parameters
///
/// The sweep prices a hypothetical contract at each strike with the
/// strategy's underlying price, rate and volatility; gamma is identical
/// for calls and puts so the kind does not matter.
pub fn gamma_surface(strategy: &Strategy, strikes: &[f64], days: &[f64]) -> GammaSurface {
    let params = strategy.parameters();
    let mut gamma = Array2::zeros((strikes.len(), days.len()));

    for (si, &strike) in strikes.iter().enumerate() {
        for (ti, &day) in days.iter().enumerate() {
            let time_years = day / 365.0;
            let g = black_scholes::greeks(
                params.underlying_price,
                strike,
                params.risk_free_rate,
                params.implied_volatility,
                time_years,
                OptionKind::Call,
            );
            gamma[[si, ti]] = g.gamma;
        }
    }

    GammaSurface {
        strikes: strikes.to_vec(),
        days: days.to_vec(),
        gamma,
    }
}

/// Gamma surface with the default sweep around the strategy's spot:
/// strikes ±span in `strike_steps`, days 1 .. 2x days-to-expiry
pub fn default_gamma_surface(strategy: &Strategy, config: &GridConfig) -> GammaSurface {
    let params = strategy.parameters();
    let strikes = grid::price_grid(params.underlying_price, config.price_span, config.strike_steps);
    let max_days = (params.days_to_expiry.max(1) * 2) as f64;
    let days = grid::linspace(1.0, max_days, config.time_steps);
    gamma_surface(strategy, &strikes, &days)
}

/// Gamma/|Theta| ratio per grid point, with a NaN sentinel where
/// |theta| < [`THETA_EPSILON`]
pub fn gamma_theta_ratio(gamma: &[f64], theta: &[f64]) -> Vec<f64> {
    gamma
        .iter()
        .zip(theta.iter())
        .map(|(&g, &t)| {
            if t.abs() < THETA_EPSILON {
                f64::NAN
            } else {
                g / t.abs()
            }
        })
        .collect()
}

/// Scale a series by its own max-abs so it fits in [-1, 1]
///
/// A flat-zero series keeps scale 1.0 and stays all zeros.
fn normalize_series(values: &[f64]) -> NormalizedSeries {
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return NormalizedSeries {
            values: values.to_vec(),
            scale: 1.0,
        };
    }
    NormalizedSeries {
        values: values.iter().map(|v| v / scale).collect(),
        scale,
    }
}

/// Normalized comparison of all Greek series of a profile
///
/// Each series is independently scaled by its own max absolute value;
/// the factors are reported so consumers can invert the scaling.
pub fn normalized_comparison(profile: &StrategyProfile) -> GreeksComparison {
    GreeksComparison {
        prices: profile.prices.clone(),
        delta: normalize_series(&profile.delta),
        gamma: normalize_series(&profile.gamma),
        theta: normalize_series(&profile.theta),
        vega: normalize_series(&profile.vega),
    }
}
