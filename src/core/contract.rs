//! Option contract definitions
//!
//! Represents a single leg of an options strategy: call/put, long/short,
//! strike, quantity and the premium paid or received per unit.

use serde::{Deserialize, Serialize};

use crate::core::{AnalyzerError, AnalyzerResult};

/// Option kind (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }
}

/// Position side (serialized lowercase to match the strategy file schema)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Quantity multiplier: +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }
}

/// One leg of an options strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Call or put
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Long or short
    #[serde(rename = "position")]
    pub side: PositionSide,
    /// Strike price
    pub strike: f64,
    /// Number of contracts (always positive; direction lives in `side`)
    pub quantity: u32,
    /// Premium paid (long) or received (short) per unit
    pub premium: f64,
}

impl OptionContract {
    pub fn new(
        kind: OptionKind,
        side: PositionSide,
        strike: f64,
        quantity: u32,
        premium: f64,
    ) -> AnalyzerResult<Self> {
        let contract = Self {
            kind,
            side,
            strike,
            quantity,
            premium,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Check the contract invariants: strike > 0, quantity >= 1, premium >= 0
    pub fn validate(&self) -> AnalyzerResult<()> {
        if !(self.strike > 0.0) || !self.strike.is_finite() {
            return Err(AnalyzerError::invalid_parameter(format!(
                "strike must be positive, got {}",
                self.strike
            )));
        }
        if self.quantity == 0 {
            return Err(AnalyzerError::invalid_parameter(
                "quantity must be at least 1; zero-quantity positions are removed, not stored",
            ));
        }
        if !(self.premium >= 0.0) || !self.premium.is_finite() {
            return Err(AnalyzerError::invalid_parameter(format!(
                "premium must be non-negative, got {}",
                self.premium
            )));
        }
        Ok(())
    }

    /// Quantity with the side sign applied
    pub fn signed_quantity(&self) -> f64 {
        self.side.sign() * self.quantity as f64
    }

    /// Intrinsic value of one unit at the given spot
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.kind.intrinsic(spot, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_kind() {
        assert_eq!(OptionKind::Call.phi(), 1.0);
        assert_eq!(OptionKind::Put.phi(), -1.0);

        assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionKind::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionKind::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_signed_quantity() {
        let long = OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 3, 5.0)
            .unwrap();
        let short = OptionContract::new(OptionKind::Put, PositionSide::Short, 100.0, 2, 4.0)
            .unwrap();

        assert_eq!(long.signed_quantity(), 3.0);
        assert_eq!(short.signed_quantity(), -2.0);
    }

    #[test]
    fn test_invalid_contracts_rejected() {
        assert!(OptionContract::new(OptionKind::Call, PositionSide::Long, 0.0, 1, 5.0).is_err());
        assert!(OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 0, 5.0).is_err());
        assert!(OptionContract::new(OptionKind::Call, PositionSide::Long, 100.0, 1, -1.0).is_err());
    }
}
