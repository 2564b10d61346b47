use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{ledger::DueStatus, workbook::cell_ref};

use super::due_dates::InstallmentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A transaction amount could not be read as a number.
    UnparseableAmount,
    /// An order's initial receivable could not be read; the raw value was copied.
    UnparseableReceivable,
    /// A transaction references an order id absent from the order ledger.
    UnmatchedOrderReference,
    /// Adding an amount would leave the decimal range; the row was skipped.
    AmountOverflow,
}

/// A recoverable anomaly tied to the cell it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWarning {
    pub kind: WarningKind,
    pub sheet: String,
    pub row: u32,
    pub cell: String,
    pub message: String,
}

/// Collects warnings for the report while mirroring each one to the log.
#[derive(Debug, Default)]
pub struct WarningLog {
    entries: Vec<RunWarning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: WarningKind,
        sheet: &str,
        row: u32,
        column: u32,
        message: impl Into<String>,
    ) {
        let warning = RunWarning {
            kind,
            sheet: sheet.to_string(),
            row,
            cell: cell_ref(row, column),
            message: message.into(),
        };
        warn!(
            sheet = %warning.sheet,
            cell = %warning.cell,
            kind = ?warning.kind,
            "{}",
            warning.message
        );
        self.entries.push(warning);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RunWarning] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RunWarning> {
        self.entries
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub as_of: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub status_counts: BTreeMap<DueStatus, usize>,
    pub classifications: Vec<InstallmentStatus>,
    pub payment_index_entries: usize,
    pub orders_with_receipts: usize,
    pub orders_with_costs: usize,
    pub orders_updated: usize,
    pub period_one_matches: usize,
    pub balance_rows_written: usize,
    pub detail_rows_copied: usize,
    pub available_balance: Decimal,
    pub withdraw_balance: Decimal,
    pub warnings: Vec<RunWarning>,
}

impl RunReport {
    pub fn count(&self, status: DueStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &RunWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// One-line summary for terminals and logs.
    pub fn headline(&self) -> String {
        let warnings = self.warnings.len();
        format!(
            "as of {}: {} installments classified ({} overdue unpaid), {} orders updated, {} {}",
            self.as_of,
            self.classifications.len(),
            self.count(DueStatus::OverdueUnpaid),
            self.orders_updated,
            warnings,
            if warnings == 1 { "warning" } else { "warnings" }
        )
    }
}

/// Tallies classifications per status; every status appears, zero or not.
pub fn count_statuses(classifications: &[InstallmentStatus]) -> BTreeMap<DueStatus, usize> {
    let mut counts: BTreeMap<DueStatus, usize> =
        DueStatus::ALL.iter().map(|status| (*status, 0)).collect();
    for entry in classifications {
        *counts.entry(entry.status).or_default() += 1;
    }
    counts
}
