//! Transaction import
//!
//! Turns broker statement rows into strategy positions in three stages:
//! - parser: one description string -> one trade record (or a failure)
//! - reconcile: trade sequence -> net positions per symbol
//! - positions: net positions -> option contracts via strike mapping
//!
//! Import is partial-failure: rows that do not match the transaction
//! template are collected with their reason and original context so the
//! caller can show a partial-success summary, while good rows proceed.
//! Reading the statement file itself (Excel/CSV) is the caller's job;
//! this module consumes already-extracted rows.

pub mod parser;
pub mod positions;
pub mod reconcile;

pub use parser::*;
pub use positions::*;
pub use reconcile::*;

use serde::{Deserialize, Serialize};

/// One row of a broker statement
///
/// Only the description is interpreted; the money columns pass through
/// untouched for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub description: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub balance: Option<f64>,
}

/// A row that failed to parse, with its context preserved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub row_index: usize,
    pub row: StatementRow,
    pub reason: ParseFailure,
}

/// Result of importing a statement: parsed trades plus failed rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub trades: Vec<TradeRecord>,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse every row of a statement; failures never abort the batch
pub fn import_statement(rows: &[StatementRow]) -> ImportReport {
    let mut report = ImportReport::default();

    for (row_index, row) in rows.iter().enumerate() {
        match parser::parse(&row.description) {
            Ok(mut trade) => {
                trade.raw_date = row.date.clone();
                report.trades.push(trade);
            }
            Err(reason) => {
                tracing::debug!(row_index, %reason, "statement row did not match template");
                report.failures.push(RowFailure {
                    row_index,
                    row: row.clone(),
                    reason,
                });
            }
        }
    }

    tracing::info!(
        trades = report.trades.len(),
        failures = report.failures.len(),
        "statement import finished"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, description: &str) -> StatementRow {
        StatementRow {
            date: date.to_string(),
            description: description.to_string(),
            debit: None,
            credit: None,
            balance: None,
        }
    }

    #[test]
    fn partial_failure_keeps_both_sides() {
        let rows = vec![
            row("1403/01/15", "خرید 10 سهم ضهرم0119 به نرخ 1250"),
            row("1403/01/16", "واریز سود سهام"),
            row("1403/01/17", "فروش 4 سهم ضهرم0119 به نرخ 1400"),
        ];

        let report = import_statement(&rows);
        assert_eq!(report.trades.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_complete());

        assert_eq!(report.trades[0].raw_date, "1403/01/15");
        assert_eq!(report.failures[0].row_index, 1);
        assert_eq!(report.failures[0].reason, ParseFailure::UnknownAction);
        assert_eq!(report.failures[0].row.description, "واریز سود سهام");
    }

    #[test]
    fn empty_statement_is_empty_report() {
        let report = import_statement(&[]);
        assert!(report.trades.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn statement_to_strategy_positions() {
        let rows = vec![
            row("1403/01/15", "خرید 10 سهم ضهرم0119 به نرخ 1000"),
            row("1403/01/16", "خرید 10 سهم ضهرم0119 به نرخ 1200"),
            row("1403/01/17", "فروش 5 سهم طهرم0120 به نرخ 900"),
        ];

        let report = import_statement(&rows);
        let net = reconcile(&report.trades);
        let contracts = positions_from_net(&net, &StrikeMapping::default());

        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].quantity, 10);
        assert!((contracts[0].premium - 1100.0).abs() < 1e-12);
        assert_eq!(contracts[1].strike, 26000.0);
    }
}
