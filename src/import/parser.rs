//! Transaction description parser
//!
//! Broker statements describe option trades in a fixed Persian template:
//!
//! ```text
//! خرید 10 سهم ضهرم0119 به نرخ 1,250
//! فروش 5 سهم طهرم0120 به نرخ 950
//! ```
//!
//! `خرید` means Buy and `فروش` means Sell; `سهم` is the unit word and
//! `به نرخ` introduces the price. Descriptions that do not match the
//! template are reported as [`ParseFailure`]s with the first missing
//! piece, never silently dropped; a failed row does not abort a batch.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::OptionKind;

/// Action keyword for a purchase
pub const BUY_KEYWORD: &str = "خرید";
/// Action keyword for a sale
pub const SELL_KEYWORD: &str = "فروش";
/// Unit word between quantity and symbol
const UNIT_KEYWORD: &str = "سهم";
/// Two-token keyword introducing the price
const PRICE_KEYWORD: (&str, &str) = ("به", "نرخ");

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

/// Why a description failed to parse, in template order
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseFailure {
    #[error("no buy/sell keyword found")]
    UnknownAction,
    #[error("no quantity after the action keyword")]
    MissingQuantity,
    #[error("no symbol between quantity and price keyword")]
    MissingSymbol,
    #[error("no parsable price after the price keyword")]
    MissingPrice,
}

/// A single parsed trade; immutable once parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub action: TradeAction,
    pub quantity: u32,
    pub symbol: String,
    pub price: f64,
    /// Date string as it appeared in the statement (Persian calendar,
    /// kept verbatim)
    pub raw_date: String,
    /// Original description, for reporting failures with context
    pub raw_description: String,
}

/// Normalize a description before tokenizing: Persian/Arabic-Indic
/// digits to ASCII, Arabic yeh/kaf to their Persian forms
fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => digit(c as u32 - 0x06F0),
            '\u{0660}'..='\u{0669}' => digit(c as u32 - 0x0660),
            'ي' => 'ی',
            'ك' => 'ک',
            c => c,
        })
        .collect()
}

fn digit(value: u32) -> char {
    (b'0' + value as u8) as char
}

/// Parse an integer token, tolerant of grouping separators
fn parse_quantity(token: &str) -> Option<u32> {
    let cleaned: String = token.chars().filter(|c| !matches!(c, ',' | '٬')).collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let quantity: u32 = cleaned.parse().ok()?;
    (quantity > 0).then_some(quantity)
}

/// Parse a decimal token, tolerant of grouping separators and both
/// Persian and ASCII decimal marks
fn parse_decimal(token: &str) -> Option<f64> {
    let cleaned: String = token
        .chars()
        .filter_map(|c| match c {
            ',' | '٬' => None,
            '٫' => Some('.'),
            c => Some(c),
        })
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parse one transaction description into a trade record
///
/// The record's `raw_date` is left empty; statement-level import fills
/// it in from the row.
pub fn parse(description: &str) -> Result<TradeRecord, ParseFailure> {
    let normalized = normalize(description);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    // 1. Action keyword, exact match anywhere in the row
    let action_idx = tokens
        .iter()
        .position(|t| *t == BUY_KEYWORD || *t == SELL_KEYWORD)
        .ok_or(ParseFailure::UnknownAction)?;
    let action = if tokens[action_idx] == BUY_KEYWORD {
        TradeAction::Buy
    } else {
        TradeAction::Sell
    };

    // Locate the price keyword so the quantity/symbol scans stop there
    let rate_idx = (action_idx + 1..tokens.len().saturating_sub(1))
        .find(|&i| tokens[i] == PRICE_KEYWORD.0 && tokens[i + 1] == PRICE_KEYWORD.1);
    let scan_end = rate_idx.unwrap_or(tokens.len());

    // 2. Quantity: first integer token after the action
    let (qty_idx, quantity) = (action_idx + 1..scan_end)
        .find_map(|i| parse_quantity(tokens[i]).map(|q| (i, q)))
        .ok_or(ParseFailure::MissingQuantity)?;

    // 3. Symbol: first non-unit token between quantity and price keyword
    let symbol = (qty_idx + 1..scan_end)
        .map(|i| tokens[i])
        .find(|t| *t != UNIT_KEYWORD)
        .ok_or(ParseFailure::MissingSymbol)?;

    // 4. Price: decimal token after the price keyword
    let rate_idx = rate_idx.ok_or(ParseFailure::MissingPrice)?;
    let price = tokens
        .get(rate_idx + 2)
        .and_then(|t| parse_decimal(t))
        .ok_or(ParseFailure::MissingPrice)?;

    Ok(TradeRecord {
        action,
        quantity,
        symbol: symbol.to_string(),
        price,
        raw_date: String::new(),
        raw_description: description.trim().to_string(),
    })
}

/// Classify an option symbol by market convention: a `ض` prefix marks a
/// call, `ط` a put, and the trailing digits are the strike code
///
/// Returns `None` for symbols that are not options (e.g. the underlying
/// itself), which import then skips.
pub fn classify_symbol(symbol: &str) -> Option<(OptionKind, String)> {
    let re = Regex::new(r"^(ض|ط)\D*(\d+)$").unwrap();
    let caps = re.captures(symbol)?;
    let kind = if &caps[1] == "ض" {
        OptionKind::Call
    } else {
        OptionKind::Put
    };
    Some((kind, caps[2].to_string()))
}
