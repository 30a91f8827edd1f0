//! Strategy analysis
//!
//! Turns a strategy into the numbers the charts plot:
//! - grid: price/time grid construction
//! - metrics: P&L and Greek aggregation over grids
//! - surface: gamma surface, gamma/theta ratio, normalized comparison

pub mod grid;
pub mod metrics;
pub mod surface;

pub use grid::*;
pub use metrics::*;
pub use surface::*;
