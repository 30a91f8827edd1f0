//! Evaluation grids
//!
//! Price and time grids for strategy evaluation. Grids are plain sorted
//! vectors; every grid cell is priced independently so sweeps stay
//! trivially parallelizable.

use serde::{Deserialize, Serialize};

/// Grid configuration for strategy evaluation and surface sweeps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Price span around the underlying, as a fraction (0.3 = ±30%)
    pub price_span: f64,
    /// Number of points in the price grid
    pub price_steps: usize,
    /// Number of points in strike sweeps for surfaces
    pub strike_steps: usize,
    /// Number of points in time sweeps for surfaces
    pub time_steps: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        // The chart defaults of the original analyzer
        Self {
            price_span: 0.30,
            price_steps: 1000,
            strike_steps: 50,
            time_steps: 20,
        }
    }
}

/// Evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Ascending price grid spanning ±`span` around `center`
pub fn price_grid(center: f64, span: f64, steps: usize) -> Vec<f64> {
    linspace(center * (1.0 - span), center * (1.0 + span), steps)
}

/// Time grid in days from 0 (expiry) to `days_to_expiry` inclusive
pub fn time_grid(days_to_expiry: u32, steps: usize) -> Vec<f64> {
    linspace(0.0, days_to_expiry as f64, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(1.0, 2.0, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 1.0);
        assert!((v[4] - 2.0).abs() < 1e-12);
        assert!((v[2] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_price_grid_ascending() {
        let grid = price_grid(100.0, 0.3, 7);
        assert!((grid[0] - 70.0).abs() < 1e-9);
        assert!((grid[6] - 130.0).abs() < 1e-9);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_time_grid_starts_at_zero() {
        let grid = time_grid(5, 6);
        assert_eq!(grid[0], 0.0);
        assert!((grid[5] - 5.0).abs() < 1e-12);
    }
}
