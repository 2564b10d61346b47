//! In-memory spreadsheet document: tagged cells, sheets and the workbook that owns them.

pub mod cell;
pub mod sheet;

pub use cell::Cell;
pub use sheet::{cell_ref, column_letters, Sheet};

use serde::{Deserialize, Serialize};

use crate::errors::{ReconError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

/// The three tables a reconciliation run works on, borrowed together.
///
/// Holding this value is the exclusive-access contract for a run: both ledgers are
/// mutably borrowed and the rules table is read-only until the run returns.
pub struct LedgerTables<'a> {
    pub orders: &'a mut Sheet,
    pub transactions: &'a mut Sheet,
    pub rules: &'a Sheet,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, replacing any existing sheet with the same name.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Borrows the order ledger, transaction ledger and rules table at once.
    pub fn ledger_tables(
        &mut self,
        orders: &str,
        transactions: &str,
        rules: &str,
    ) -> Result<LedgerTables<'_>> {
        if orders == transactions || orders == rules || transactions == rules {
            return Err(ReconError::InvalidLayout(format!(
                "ledger sheets must be distinct (orders `{orders}`, \
                 transactions `{transactions}`, rules `{rules}`)"
            )));
        }
        for name in [orders, transactions, rules] {
            if self.sheet(name).is_none() {
                return Err(ReconError::MissingSheet(name.to_string()));
            }
        }

        let mut order_sheet = None;
        let mut transaction_sheet = None;
        let mut rules_sheet = None;
        for sheet in self.sheets.iter_mut() {
            if order_sheet.is_none() && sheet.name == orders {
                order_sheet = Some(sheet);
            } else if transaction_sheet.is_none() && sheet.name == transactions {
                transaction_sheet = Some(sheet);
            } else if rules_sheet.is_none() && sheet.name == rules {
                rules_sheet = Some(&*sheet);
            }
        }

        match (order_sheet, transaction_sheet, rules_sheet) {
            (Some(orders), Some(transactions), Some(rules)) => Ok(LedgerTables {
                orders,
                transactions,
                rules,
            }),
            _ => Err(ReconError::InvalidLayout(
                "ledger sheets could not be borrowed together".into(),
            )),
        }
    }
}
