//! # Options Analyzer - Strategy P&L and Greeks Engine
//!
//! A library for analyzing multi-leg options strategies: given a set of
//! option positions (calls/puts, long/short, strike, quantity, premium)
//! and market parameters, it computes profit/loss and Greek sensitivities
//! over price/time grids and builds derived surfaces for charting.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: European pricing, Greeks and an IV solver
//! - **Strategy aggregation**: quantity-weighted P&L and Greeks over
//!   price x time grids
//! - **Surfaces**: gamma over strike x time, gamma/theta ratio,
//!   normalized all-Greeks comparison
//! - **Transaction import**: parses Persian broker-statement rows into
//!   trades, reconciles them into net positions and maps them onto
//!   strategy positions
//! - **Store**: JSON save/load with exact round-trips
//!
//! ## Usage
//!
//! ```rust
//! use options_analyzer::prelude::*;
//!
//! let params = MarketParameters::new(25990.0, 0.2, 5, 0.69).unwrap();
//! let mut strategy = Strategy::new(params).unwrap();
//! strategy.add_position(
//!     OptionContract::new(OptionKind::Call, PositionSide::Long, 26000.0, 1, 1500.0).unwrap(),
//! ).unwrap();
//!
//! let prices = price_grid(25990.0, 0.3, 100);
//! let profile = evaluate_profile(&strategy, &prices);
//! assert_eq!(profile.pnl.len(), 100);
//! ```
//!
//! ## What This Library Does NOT Do
//!
//! - Fetch market data or talk to a broker
//! - Price American early exercise (European approximation)
//! - Render charts or own any UI state; callers pass positions and
//!   parameters in and get immutable result structures back

pub mod analysis;
pub mod core;
pub mod import;
pub mod models;
pub mod store;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        AnalyzerError, AnalyzerResult, Greeks, MarketParameters, OptionContract, OptionKind,
        PositionSide, Strategy,
    };

    // Pricing
    pub use crate::models::{
        greeks as bs_greeks, implied_volatility, norm_cdf, norm_pdf, price as bs_price,
        price_and_greeks,
    };

    // Analysis
    pub use crate::analysis::{
        default_gamma_surface, evaluate, evaluate_at, evaluate_profile, gamma_surface,
        gamma_theta_ratio, linspace, normalized_comparison, price_grid, time_grid, GammaSurface,
        GreeksComparison, GridConfig, NormalizedSeries, StrategyGrid, StrategyProfile,
        THETA_EPSILON,
    };

    // Import
    pub use crate::import::{
        classify_symbol, import_statement, parse, positions_from_net, reconcile, ImportReport,
        NetPosition, ParseFailure, RowFailure, StatementRow, StrikeMapping, TradeAction,
        TradeRecord,
    };

    // Store
    pub use crate::store::{load_strategy, save_strategy};
}

// Re-export main types at crate root
pub use crate::core::{AnalyzerError, AnalyzerResult};
pub use crate::core::{MarketParameters, Strategy};
