//! Position reconciliation
//!
//! Folds a chronological sequence of trades into net positions per
//! symbol. This component does not sort; callers pass trades in the
//! order they want them applied (statements are already chronological).
//!
//! Average-price rules:
//! - a trade in the direction of the current position updates the
//!   weighted average of prior quantity and trade quantity
//! - a reducing trade shrinks the quantity and leaves the average alone
//! - a trade crossing through zero flips the side and resets the average
//!   to the crossing trade's price (cost basis restarts at the flip)
//!
//! Output order is first-seen-symbol order, deterministic for a given
//! input sequence. Symbols that net to zero are dropped, not reported.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::PositionSide;
use crate::import::parser::{TradeAction, TradeRecord};

/// Net position for one symbol after offsetting buys and sells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetPosition {
    pub symbol: String,
    pub side: PositionSide,
    pub quantity: u32,
    pub average_price: f64,
}

/// Running state while folding trades
#[derive(Debug, Clone, Copy, Default)]
struct Running {
    /// Signed quantity: positive long, negative short
    quantity: i64,
    average_price: f64,
}

impl Running {
    fn apply(&mut self, action: TradeAction, quantity: u32, price: f64) {
        let signed = match action {
            TradeAction::Buy => quantity as i64,
            TradeAction::Sell => -(quantity as i64),
        };
        let new_quantity = self.quantity + signed;

        if self.quantity == 0 {
            // Opening from flat
            self.average_price = price;
        } else if self.quantity.signum() == signed.signum() {
            // Same direction: weighted average of old and new
            let old_qty = self.quantity.unsigned_abs() as f64;
            let add_qty = quantity as f64;
            self.average_price =
                (old_qty * self.average_price + add_qty * price) / (old_qty + add_qty);
        } else if new_quantity.signum() != self.quantity.signum() && new_quantity != 0 {
            // Crossed through zero: basis resets to the crossing price
            self.average_price = price;
        }
        // Plain reduction keeps the existing average

        self.quantity = new_quantity;
    }
}

/// Fold trades into net positions, one per symbol, first-seen order
pub fn reconcile(trades: &[TradeRecord]) -> Vec<NetPosition> {
    let mut order: Vec<String> = Vec::new();
    let mut running: HashMap<String, Running> = HashMap::new();

    for trade in trades {
        let entry = running.entry(trade.symbol.clone()).or_insert_with(|| {
            order.push(trade.symbol.clone());
            Running::default()
        });
        entry.apply(trade.action, trade.quantity, trade.price);
    }

    order
        .into_iter()
        .filter_map(|symbol| {
            let state = running[&symbol];
            if state.quantity == 0 {
                return None; // closed out, flat positions are removed
            }
            Some(NetPosition {
                symbol,
                side: if state.quantity > 0 {
                    PositionSide::Long
                } else {
                    PositionSide::Short
                },
                quantity: state.quantity.unsigned_abs() as u32,
                average_price: state.average_price,
            })
        })
        .collect()
}
