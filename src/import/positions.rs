//! Net positions to strategy positions
//!
//! Statements identify options by symbol; the strike lives in a
//! symbol-embedded code that has to be mapped to an actual strike
//! price. The mapping table ships with the exchange's current codes
//! and accepts custom entries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::{OptionContract, PositionSide};
use crate::import::parser::classify_symbol;
use crate::import::reconcile::NetPosition;

/// Strike-code to strike-price mapping with a fallback for unknown codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeMapping {
    entries: HashMap<String, f64>,
    pub fallback: f64,
}

impl Default for StrikeMapping {
    fn default() -> Self {
        let entries = [
            ("0119", 24000.0),
            ("0120", 26000.0),
            ("0121", 28000.0),
            ("0122", 30000.0),
            ("2018", 18000.0),
        ]
        .into_iter()
        .map(|(code, strike)| (code.to_string(), strike))
        .collect();

        Self {
            entries,
            fallback: 25000.0,
        }
    }
}

impl StrikeMapping {
    pub fn empty(fallback: f64) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, code: impl Into<String>, strike: f64) {
        self.entries.insert(code.into(), strike);
    }

    /// Strike for a code, falling back when the code is unknown
    pub fn strike_for(&self, code: &str) -> f64 {
        self.entries.get(code).copied().unwrap_or(self.fallback)
    }
}

/// Convert reconciled net positions into strategy positions
///
/// The position side carries over directly; the net average price
/// becomes the premium. Symbols that do not classify as options are
/// skipped with a warning, like the original extraction stage did.
pub fn positions_from_net(net: &[NetPosition], mapping: &StrikeMapping) -> Vec<OptionContract> {
    let mut contracts = Vec::new();

    for position in net {
        let Some((kind, strike_code)) = classify_symbol(&position.symbol) else {
            tracing::warn!(symbol = %position.symbol, "skipping non-option symbol");
            continue;
        };

        contracts.push(OptionContract {
            kind,
            side: position.side,
            strike: mapping.strike_for(&strike_code),
            quantity: position.quantity,
            premium: position.average_price,
        });
    }

    contracts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionKind;

    fn net(symbol: &str, side: PositionSide, quantity: u32, average_price: f64) -> NetPosition {
        NetPosition {
            symbol: symbol.to_string(),
            side,
            quantity,
            average_price,
        }
    }

    #[test]
    fn default_mapping_matches_exchange_table() {
        let mapping = StrikeMapping::default();
        assert_eq!(mapping.strike_for("0119"), 24000.0);
        assert_eq!(mapping.strike_for("0122"), 30000.0);
        assert_eq!(mapping.strike_for("9999"), 25000.0); // fallback
    }

    #[test]
    fn net_positions_become_contracts() {
        let positions = vec![
            net("ضهرم0119", PositionSide::Long, 10, 1250.0),
            net("طهرم0120", PositionSide::Short, 5, 950.0),
        ];

        let contracts = positions_from_net(&positions, &StrikeMapping::default());
        assert_eq!(contracts.len(), 2);

        assert_eq!(contracts[0].kind, OptionKind::Call);
        assert_eq!(contracts[0].side, PositionSide::Long);
        assert_eq!(contracts[0].strike, 24000.0);
        assert_eq!(contracts[0].quantity, 10);
        assert_eq!(contracts[0].premium, 1250.0);

        assert_eq!(contracts[1].kind, OptionKind::Put);
        assert_eq!(contracts[1].strike, 26000.0);
    }

    #[test]
    fn non_option_symbols_are_skipped() {
        let positions = vec![
            net("XYZ", PositionSide::Long, 100, 500.0),
            net("ضهرم0121", PositionSide::Long, 1, 800.0),
        ];

        let contracts = positions_from_net(&positions, &StrikeMapping::default());
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].strike, 28000.0);
    }
}
