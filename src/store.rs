//! Strategy persistence
//!
//! Saves and loads strategies as JSON. The on-disk schema matches the
//! analyzer's historical save files:
//!
//! ```json
//! {
//!   "saved_at": "2026-08-23T10:00:00Z",
//!   "parameters": { "price": 25990.0, "rate": 0.2, "days": 5, "volatility": 0.69 },
//!   "positions": [
//!     { "type": "Call", "position": "long", "strike": 26000.0,
//!       "quantity": 1, "premium": 1500.0 }
//!   ]
//! }
//! ```
//!
//! Load re-validates, so hand-edited files with broken invariants are
//! rejected instead of flowing into the engine. The strategy payload
//! round-trips exactly, including position order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{AnalyzerError, AnalyzerResult, Strategy};

#[derive(Debug, Serialize, Deserialize)]
struct StrategyDocument {
    saved_at: DateTime<Utc>,
    #[serde(flatten)]
    strategy: Strategy,
}

/// Save a strategy to a JSON file
pub fn save_strategy(path: impl AsRef<Path>, strategy: &Strategy) -> AnalyzerResult<()> {
    let document = StrategyDocument {
        saved_at: Utc::now(),
        strategy: strategy.clone(),
    };

    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| AnalyzerError::Serialization(e.to_string()))?;

    fs::write(path.as_ref(), json)?;

    tracing::info!(path = %path.as_ref().display(), positions = strategy.len(), "saved strategy");
    Ok(())
}

/// Load a strategy from a JSON file, re-validating all invariants
pub fn load_strategy(path: impl AsRef<Path>) -> AnalyzerResult<Strategy> {
    let json = fs::read_to_string(path.as_ref())?;

    let document: StrategyDocument =
        serde_json::from_str(&json).map_err(|e| AnalyzerError::Serialization(e.to_string()))?;

    document.strategy.validate()?;

    tracing::info!(
        path = %path.as_ref().display(),
        positions = document.strategy.len(),
        "loaded strategy"
    );
    Ok(document.strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MarketParameters, OptionContract, OptionKind, PositionSide};
    use tempfile::tempdir;

    fn sample_strategy() -> Strategy {
        let params = MarketParameters::new(25990.0, 0.2, 5, 0.69).unwrap();
        let mut strategy = Strategy::new(params).unwrap();
        strategy
            .add_position(
                OptionContract::new(OptionKind::Call, PositionSide::Long, 26000.0, 2, 1500.0)
                    .unwrap(),
            )
            .unwrap();
        strategy
            .add_position(
                OptionContract::new(OptionKind::Put, PositionSide::Short, 24000.0, 1, 875.25)
                    .unwrap(),
            )
            .unwrap();
        strategy
            .add_position(
                OptionContract::new(OptionKind::Call, PositionSide::Short, 28000.0, 3, 410.0)
                    .unwrap(),
            )
            .unwrap();
        strategy
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strategy.json");

        let strategy = sample_strategy();
        save_strategy(&path, &strategy).unwrap();
        let loaded = load_strategy(&path).unwrap();

        // Exact round-trip: ordering and every numeric field
        assert_eq!(loaded, strategy);
    }

    #[test]
    fn test_schema_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strategy.json");

        save_strategy(&path, &sample_strategy()).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["parameters"]["price"], 25990.0);
        assert_eq!(value["parameters"]["days"], 5);
        assert_eq!(value["positions"][0]["type"], "Call");
        assert_eq!(value["positions"][0]["position"], "long");
        assert_eq!(value["positions"][1]["premium"], 875.25);
    }

    #[test]
    fn test_load_rejects_broken_invariants() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strategy.json");

        // Zero-quantity position smuggled in by hand
        let json = r#"{
            "saved_at": "2026-01-01T00:00:00Z",
            "parameters": { "price": 25990.0, "rate": 0.2, "days": 5, "volatility": 0.69 },
            "positions": [
                { "type": "Call", "position": "long", "strike": 26000.0,
                  "quantity": 0, "premium": 1500.0 }
            ]
        }"#;
        std::fs::write(&path, json).unwrap();

        assert!(load_strategy(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = load_strategy(dir.path().join("missing.json"));
        assert!(matches!(result, Err(AnalyzerError::IO(_))));
    }
}
