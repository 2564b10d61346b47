use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ReconError, Result};

static STANDARD_LAYOUT: Lazy<WorkbookLayout> = Lazy::new(WorkbookLayout::default);

/// Position map of the three tables. Columns and rows are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkbookLayout {
    #[serde(default)]
    pub sheets: SheetNames,
    #[serde(default)]
    pub orders: OrderColumns,
    #[serde(default)]
    pub transactions: TransactionColumns,
    #[serde(default)]
    pub rules: RulesLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNames {
    pub orders: String,
    pub transactions: String,
    pub rules: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            orders: "订单管理".into(),
            transactions: "资金流水账".into(),
            rules: "工具表".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderColumns {
    /// First row read by the receivable, period-1 and order-lookup scans.
    pub first_row: u32,
    /// First row whose due dates are classified.
    pub status_first_row: u32,
    /// Row holding the period label above each due-date column.
    pub period_header_row: u32,
    pub order_id: u32,
    pub descriptive_first: u32,
    pub descriptive_count: u32,
    pub initial_receivable: u32,
    pub current_receivable: u32,
    pub due_date_first: u32,
    pub due_date_count: u32,
    pub period_one_amount: u32,
    pub total_cost: u32,
}

impl Default for OrderColumns {
    fn default() -> Self {
        Self {
            first_row: 2,
            status_first_row: 5,
            period_header_row: 4,
            order_id: 2,
            descriptive_first: 3,
            descriptive_count: 6,
            initial_receivable: 11,
            current_receivable: 12,
            due_date_first: 14,
            due_date_count: 10,
            period_one_amount: 24,
            total_cost: 25,
        }
    }
}

impl OrderColumns {
    pub fn descriptive_columns(&self) -> impl Iterator<Item = u32> {
        self.descriptive_first..self.descriptive_first + self.descriptive_count
    }

    pub fn due_date_columns(&self) -> impl Iterator<Item = u32> {
        self.due_date_first..self.due_date_first + self.due_date_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionColumns {
    /// First row read by the payment index, receivable and period-1 scans.
    pub first_row: u32,
    /// First row replayed by the running-balance walk.
    pub balance_first_row: u32,
    pub date: u32,
    pub order_id: u32,
    /// First column receiving copied order details; the width follows the order ledger.
    pub descriptive_first: u32,
    pub amount: u32,
    pub period: u32,
    pub payment_kind: u32,
    pub balance_category: u32,
    pub available_balance: u32,
    pub withdraw_balance: u32,
}

impl Default for TransactionColumns {
    fn default() -> Self {
        Self {
            first_row: 2,
            balance_first_row: 5,
            date: 1,
            order_id: 2,
            descriptive_first: 3,
            amount: 9,
            period: 10,
            payment_kind: 11,
            balance_category: 12,
            available_balance: 14,
            withdraw_balance: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub first: u32,
    pub last: u32,
}

impl RowRange {
    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesLayout {
    pub column: u32,
    pub withdraw_rows: RowRange,
    pub available_rows: RowRange,
}

impl Default for RulesLayout {
    fn default() -> Self {
        Self {
            column: 2,
            withdraw_rows: RowRange { first: 2, last: 5 },
            available_rows: RowRange { first: 6, last: 15 },
        }
    }
}

impl WorkbookLayout {
    /// Shared instance of the default layout.
    pub fn standard() -> &'static WorkbookLayout {
        &STANDARD_LAYOUT
    }

    /// Rejects zero positions and inverted row ranges before any sheet is touched.
    pub fn validate(&self) -> Result<()> {
        let o = &self.orders;
        let t = &self.transactions;
        let r = &self.rules;
        let positions = [
            ("orders.first_row", o.first_row),
            ("orders.status_first_row", o.status_first_row),
            ("orders.period_header_row", o.period_header_row),
            ("orders.order_id", o.order_id),
            ("orders.descriptive_first", o.descriptive_first),
            ("orders.initial_receivable", o.initial_receivable),
            ("orders.current_receivable", o.current_receivable),
            ("orders.due_date_first", o.due_date_first),
            ("orders.period_one_amount", o.period_one_amount),
            ("orders.total_cost", o.total_cost),
            ("transactions.first_row", t.first_row),
            ("transactions.balance_first_row", t.balance_first_row),
            ("transactions.date", t.date),
            ("transactions.order_id", t.order_id),
            ("transactions.descriptive_first", t.descriptive_first),
            ("transactions.amount", t.amount),
            ("transactions.period", t.period),
            ("transactions.payment_kind", t.payment_kind),
            ("transactions.balance_category", t.balance_category),
            ("transactions.available_balance", t.available_balance),
            ("transactions.withdraw_balance", t.withdraw_balance),
            ("rules.column", r.column),
            ("rules.withdraw_rows.first", r.withdraw_rows.first),
            ("rules.available_rows.first", r.available_rows.first),
        ];
        if let Some((field, _)) = positions.iter().find(|(_, value)| *value == 0) {
            return Err(ReconError::InvalidLayout(format!(
                "`{field}` must be 1 or greater"
            )));
        }
        for (field, range) in [
            ("rules.withdraw_rows", r.withdraw_rows),
            ("rules.available_rows", r.available_rows),
        ] {
            if range.first > range.last {
                return Err(ReconError::InvalidLayout(format!(
                    "`{field}` starts after it ends ({} > {})",
                    range.first, range.last
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_documented_positions() {
        let layout = WorkbookLayout::standard();
        assert_eq!(
            layout.orders.due_date_columns().collect::<Vec<_>>(),
            (14..=23).collect::<Vec<_>>()
        );
        assert_eq!(
            layout.orders.descriptive_columns().collect::<Vec<_>>(),
            vec![3, 4, 5, 6, 7, 8]
        );
        assert_eq!(layout.rules.withdraw_rows.rows().count(), 4);
        assert_eq!(layout.rules.available_rows.rows().count(), 10);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn zero_column_is_rejected() {
        let mut layout = WorkbookLayout::default();
        layout.transactions.amount = 0;
        let err = layout.validate().expect_err("zero column");
        assert!(err.to_string().contains("transactions.amount"));
    }

    #[test]
    fn inverted_rule_range_is_rejected() {
        let mut layout = WorkbookLayout::default();
        layout.rules.available_rows = RowRange { first: 9, last: 3 };
        assert!(layout.validate().is_err());
    }
}
