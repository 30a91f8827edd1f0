//! Strategy and market parameters
//!
//! A strategy is an ordered list of option positions plus one set of
//! market parameters. Positions are mutated only through the validated
//! add/remove/replace operations so invariants cannot be bypassed.

use serde::{Deserialize, Serialize};

use crate::core::{AnalyzerError, AnalyzerResult, OptionContract};

/// Market parameters shared by all positions of a strategy
///
/// Field names in the serialized form follow the strategy file schema
/// (`price`, `rate`, `days`, `volatility`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Current underlying price
    #[serde(rename = "price")]
    pub underlying_price: f64,
    /// Annualized risk-free rate (typically 0-1)
    #[serde(rename = "rate")]
    pub risk_free_rate: f64,
    /// Days to expiration; 0 is the expiry-day boundary
    #[serde(rename = "days")]
    pub days_to_expiry: u32,
    /// Annualized implied volatility
    #[serde(rename = "volatility")]
    pub implied_volatility: f64,
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self {
            underlying_price: 25990.0,
            risk_free_rate: 0.2,
            days_to_expiry: 5,
            implied_volatility: 0.69,
        }
    }
}

impl MarketParameters {
    pub fn new(
        underlying_price: f64,
        risk_free_rate: f64,
        days_to_expiry: u32,
        implied_volatility: f64,
    ) -> AnalyzerResult<Self> {
        let params = Self {
            underlying_price,
            risk_free_rate,
            days_to_expiry,
            implied_volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check parameter invariants: positive price and volatility, finite rate
    pub fn validate(&self) -> AnalyzerResult<()> {
        if !(self.underlying_price > 0.0) || !self.underlying_price.is_finite() {
            return Err(AnalyzerError::invalid_parameter(format!(
                "underlying price must be positive, got {}",
                self.underlying_price
            )));
        }
        if !(self.implied_volatility > 0.0) || !self.implied_volatility.is_finite() {
            return Err(AnalyzerError::invalid_parameter(format!(
                "implied volatility must be positive, got {}",
                self.implied_volatility
            )));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(AnalyzerError::invalid_parameter(
                "risk-free rate must be finite",
            ));
        }
        Ok(())
    }

    /// Time to expiry in years (days / 365, the original model's convention)
    pub fn time_years(&self) -> f64 {
        self.days_to_expiry as f64 / 365.0
    }
}

/// An options strategy: ordered positions + market parameters
///
/// Insertion order of positions is preserved for display and
/// serialization round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    parameters: MarketParameters,
    positions: Vec<OptionContract>,
}

impl Strategy {
    pub fn new(parameters: MarketParameters) -> AnalyzerResult<Self> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            positions: Vec::new(),
        })
    }

    pub fn parameters(&self) -> &MarketParameters {
        &self.parameters
    }

    /// Replace the market parameters (validated)
    pub fn set_parameters(&mut self, parameters: MarketParameters) -> AnalyzerResult<()> {
        parameters.validate()?;
        self.parameters = parameters;
        Ok(())
    }

    pub fn positions(&self) -> &[OptionContract] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Append a position (validated)
    pub fn add_position(&mut self, contract: OptionContract) -> AnalyzerResult<()> {
        contract.validate()?;
        self.positions.push(contract);
        Ok(())
    }

    /// Remove the position at `index`, preserving the order of the rest
    pub fn remove_position(&mut self, index: usize) -> AnalyzerResult<OptionContract> {
        if index >= self.positions.len() {
            return Err(AnalyzerError::invalid_parameter(format!(
                "position index {} out of range ({} positions)",
                index,
                self.positions.len()
            )));
        }
        Ok(self.positions.remove(index))
    }

    /// Replace the position at `index` (validated)
    pub fn replace_position(
        &mut self,
        index: usize,
        contract: OptionContract,
    ) -> AnalyzerResult<()> {
        if index >= self.positions.len() {
            return Err(AnalyzerError::invalid_parameter(format!(
                "position index {} out of range ({} positions)",
                index,
                self.positions.len()
            )));
        }
        contract.validate()?;
        self.positions[index] = contract;
        Ok(())
    }

    /// Re-validate everything, e.g. after deserialization
    pub fn validate(&self) -> AnalyzerResult<()> {
        self.parameters.validate()?;
        for position in &self.positions {
            position.validate()?;
        }
        Ok(())
    }
}
