//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing (no dividend yield)
//! - Greeks computation (Delta, Gamma, Theta, Vega, Rho)
//! - Implied volatility solver (Newton-Raphson with bisection fallback)
//!
//! Conventions: theta is reported per calendar day (annual theta / 365),
//! vega and rho per 1% move (/ 100). All functions are pure and return
//! per-unit values; quantity weighting happens in the strategy aggregator.
//!
//! At the `time <= 0 || vol <= 0` boundary the model degenerates to
//! intrinsic value with delta in {0, 1} (call) or {0, -1} (put) and all
//! other Greeks zero. The degenerate case is an explicit branch so no
//! division by zero ever reaches the output.

use statrs::distribution::{ContinuousCDF, Normal};
use std::f64::consts::PI;

use crate::core::{AnalyzerError, AnalyzerResult, Greeks, OptionKind};

/// Floor for the σ√T denominator in d1
const MIN_VOL_SQRT_TIME: f64 = 1e-10;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    let vol_sqrt_t = (vol * time.sqrt()).max(MIN_VOL_SQRT_TIME);
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / vol_sqrt_t
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// Black-Scholes European option price
pub fn price(spot: f64, strike: f64, rate: f64, vol: f64, time: f64, kind: OptionKind) -> f64 {
    if time <= 0.0 || vol <= 0.0 {
        // At expiry (or zero vol) time value collapses
        return kind.intrinsic(spot, strike);
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d2(spot, strike, rate, vol, time);
    let df = (-rate * time).exp();

    match kind {
        OptionKind::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionKind::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// Black-Scholes Greeks
pub fn greeks(spot: f64, strike: f64, rate: f64, vol: f64, time: f64, kind: OptionKind) -> Greeks {
    if time <= 0.0 || vol <= 0.0 {
        // Boundary: delta is the exercise indicator, everything else is 0
        let delta = match kind {
            OptionKind::Call => {
                if spot > strike {
                    1.0
                } else {
                    0.0
                }
            }
            OptionKind::Put => {
                if spot < strike {
                    -1.0
                } else {
                    0.0
                }
            }
        };
        return Greeks::new(delta, 0.0, 0.0, 0.0, 0.0);
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d2(spot, strike, rate, vol, time);
    let df = (-rate * time).exp();
    let sqrt_t = time.sqrt();
    let pdf_d1 = norm_pdf(d1);

    let delta = match kind {
        OptionKind::Call => norm_cdf(d1),
        OptionKind::Put => norm_cdf(d1) - 1.0,
    };

    // Gamma (same for call and put)
    let gamma = pdf_d1 / (spot * vol * sqrt_t);

    // Vega (same for call and put, per 1% vol move)
    let vega = spot * sqrt_t * pdf_d1 / 100.0;

    // Theta, converted from per-year to per-day
    let decay = -spot * pdf_d1 * vol / (2.0 * sqrt_t);
    let theta = match kind {
        OptionKind::Call => decay - rate * strike * df * norm_cdf(d2),
        OptionKind::Put => decay + rate * strike * df * norm_cdf(-d2),
    };
    let theta_per_day = theta / 365.0;

    // Rho (per 1% rate move)
    let rho = match kind {
        OptionKind::Call => strike * time * df * norm_cdf(d2) / 100.0,
        OptionKind::Put => -strike * time * df * norm_cdf(-d2) / 100.0,
    };

    Greeks::new(delta, gamma, theta_per_day, vega, rho)
}

/// Validated pricing entry point: theoretical price plus all Greeks
///
/// Rejects non-positive spot/strike/vol and negative time at the boundary
/// instead of clamping.
pub fn price_and_greeks(
    kind: OptionKind,
    strike: f64,
    spot: f64,
    rate: f64,
    time: f64,
    vol: f64,
) -> AnalyzerResult<(f64, Greeks)> {
    if !(spot > 0.0) || !spot.is_finite() {
        return Err(AnalyzerError::invalid_parameter(format!(
            "spot must be positive, got {spot}"
        )));
    }
    if !(strike > 0.0) || !strike.is_finite() {
        return Err(AnalyzerError::invalid_parameter(format!(
            "strike must be positive, got {strike}"
        )));
    }
    if !(vol > 0.0) || !vol.is_finite() {
        return Err(AnalyzerError::invalid_parameter(format!(
            "volatility must be positive, got {vol}"
        )));
    }
    if !(time >= 0.0) || !time.is_finite() {
        return Err(AnalyzerError::invalid_parameter(format!(
            "time to expiry must be non-negative, got {time}"
        )));
    }

    Ok((
        price(spot, strike, rate, vol, time, kind),
        greeks(spot, strike, rate, vol, time, kind),
    ))
}

/// Implied volatility solver using Newton-Raphson with bisection fallback
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    kind: OptionKind,
) -> AnalyzerResult<f64> {
    if market_price <= 0.0 {
        return Err(AnalyzerError::numerical("Non-positive option price"));
    }
    if time <= 0.0 {
        return Err(AnalyzerError::numerical("Non-positive time to expiry"));
    }
    if spot <= 0.0 || strike <= 0.0 {
        return Err(AnalyzerError::numerical("Non-positive spot or strike"));
    }

    let intrinsic = kind.intrinsic(spot, strike);
    let df = (-rate * time).exp();

    if market_price < intrinsic * df * 0.99 {
        return Err(AnalyzerError::numerical("Price below intrinsic value"));
    }

    // Initial guess using Brenner-Subrahmanyam approximation
    let atm_approx = market_price / (0.4 * spot * time.sqrt());
    let mut vol = atm_approx.clamp(0.01, 3.0);

    let max_iter = 100;
    let tol = 1e-8;

    for _ in 0..max_iter {
        let bs_price = price(spot, strike, rate, vol, time, kind);
        let diff = bs_price - market_price;

        if diff.abs() < tol {
            return Ok(vol);
        }

        // Vega for the Newton step (per unit vol here, not per 1%)
        let d1 = d1(spot, strike, rate, vol, time);
        let vega = spot * norm_pdf(d1) * time.sqrt();

        if vega.abs() < 1e-12 {
            break; // Vega too small, switch to bisection
        }

        let new_vol = vol - diff / vega;

        if new_vol <= 0.0 || new_vol > 5.0 {
            break; // Out of bounds, switch to bisection
        }

        vol = new_vol;
    }

    bisection_iv(market_price, spot, strike, rate, time, kind)
}

/// Bisection method for IV (slower but more robust)
fn bisection_iv(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    kind: OptionKind,
) -> AnalyzerResult<f64> {
    let mut low = 0.001;
    let mut high = 5.0;
    let tol = 1e-8;
    let max_iter = 100;

    for _ in 0..max_iter {
        let mid = (low + high) / 2.0;
        let bs_price = price(spot, strike, rate, mid, time, kind);
        let diff = bs_price - market_price;

        if diff.abs() < tol {
            return Ok(mid);
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }

        if (high - low) < tol {
            return Ok(mid);
        }
    }

    Err(AnalyzerError::numerical("IV solver did not converge"))
}
