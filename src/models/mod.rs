//! Pricing models
//!
//! Implements:
//! - Black-Scholes (European pricing, Greeks, IV solver)
//!
//! The analyzer treats all contracts as European; American exercise is
//! approximated by the European price.

pub mod black_scholes;

pub use black_scholes::*;
