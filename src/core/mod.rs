//! Core data types for the options strategy analyzer
//!
//! Defines fundamental types:
//! - OptionContract: kind (call/put), side (long/short), strike, quantity, premium
//! - Strategy: ordered positions + market parameters
//! - Greeks: first-order sensitivities
//! - AnalyzerError: crate-wide error type

pub mod contract;
pub mod error;
pub mod greeks;
pub mod strategy;

pub use contract::*;
pub use error::*;
pub use greeks::*;
pub use strategy::*;
