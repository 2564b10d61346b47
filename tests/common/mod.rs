#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use ledger_recon::{
    config::WorkbookLayout,
    storage::save_workbook_to_path,
    workbook::{Cell, Sheet, Workbook},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const PERIODS: [&str; 10] = [
    "第一期", "第二期", "第三期", "第四期", "第五期",
    "第六期", "第七期", "第八期", "第九期", "第十期",
];

pub fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).expect("valid date")
}

/// Unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Saves `workbook` into a fresh temp directory and returns its path.
pub fn write_temp_workbook(workbook: &Workbook) -> PathBuf {
    let path = temp_dir().join("ledger.json");
    save_workbook_to_path(workbook, &path).expect("write workbook fixture");
    path
}

/// One transaction ledger row.
#[derive(Debug, Clone)]
pub struct Txn {
    date: Option<NaiveDate>,
    order: Option<String>,
    amount: Cell,
    period: Option<String>,
    kind: Option<String>,
    category: Option<String>,
}

impl Txn {
    pub fn new(amount: impl Into<Cell>) -> Self {
        Self {
            date: None,
            order: None,
            amount: amount.into(),
            period: None,
            kind: None,
            category: None,
        }
    }

    /// A dated rent payment for `order` in `period`.
    pub fn rent(order: &str, period: &str, amount: impl Into<Cell>, date: NaiveDate) -> Self {
        Self::new(amount).order(order).period(period).kind("租金").dated(date)
    }

    pub fn order(mut self, id: &str) -> Self {
        self.order = Some(id.into());
        self
    }

    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn period(mut self, period: &str) -> Self {
        self.period = Some(period.into());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Builds workbooks laid out like the standard ledger: orders from row 5 under the period
/// header in row 4, transactions from row 5, rules in column B.
pub struct LedgerBuilder {
    orders: Sheet,
    transactions: Sheet,
    rules: Sheet,
    next_order_row: u32,
    next_txn_row: u32,
    next_withdraw_rule: u32,
    next_available_rule: u32,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerBuilder {
    pub fn new() -> Self {
        let layout = WorkbookLayout::standard();
        let mut orders = Sheet::new(layout.sheets.orders.clone());
        for (column, label) in layout.orders.due_date_columns().zip(PERIODS) {
            orders.set(layout.orders.period_header_row, column, Cell::text(label));
        }
        Self {
            orders,
            transactions: Sheet::new(layout.sheets.transactions.clone()),
            rules: Sheet::new(layout.sheets.rules.clone()),
            next_order_row: layout.orders.status_first_row,
            next_txn_row: layout.transactions.balance_first_row,
            next_withdraw_rule: layout.rules.withdraw_rows.first,
            next_available_rule: layout.rules.available_rows.first,
        }
    }

    /// Adds an order with descriptive fields `<id>-d1..d6`; due dates fill the period
    /// columns left to right.
    pub fn order(mut self, id: &str, initial: impl Into<Cell>, due_dates: &[Cell]) -> Self {
        let row = self.next_order_row;
        self.next_order_row += 1;
        self.order_at(row, id, initial, due_dates)
    }

    /// Places an order on an explicit row without moving the running row counter.
    pub fn order_at(
        mut self,
        row: u32,
        id: &str,
        initial: impl Into<Cell>,
        due_dates: &[Cell],
    ) -> Self {
        let columns = &WorkbookLayout::standard().orders;
        self.orders.set(row, columns.order_id, Cell::text(id));
        for (n, column) in columns.descriptive_columns().enumerate() {
            self.orders
                .set(row, column, Cell::text(format!("{id}-d{}", n + 1)));
        }
        self.orders.set(row, columns.initial_receivable, initial.into());
        for (column, due) in columns.due_date_columns().zip(due_dates) {
            self.orders.set(row, column, due.clone());
        }
        self
    }

    pub fn txn(mut self, txn: Txn) -> Self {
        let row = self.next_txn_row;
        self.next_txn_row += 1;
        self.txn_at(row, txn)
    }

    /// Places a transaction on an explicit row without moving the running row counter.
    pub fn txn_at(mut self, row: u32, txn: Txn) -> Self {
        let columns = &WorkbookLayout::standard().transactions;
        if let Some(date) = txn.date {
            self.transactions.set(row, columns.date, Cell::date(date));
        }
        if let Some(order) = txn.order {
            self.transactions.set(row, columns.order_id, Cell::text(order));
        }
        self.transactions.set(row, columns.amount, txn.amount);
        if let Some(period) = txn.period {
            self.transactions.set(row, columns.period, Cell::text(period));
        }
        if let Some(kind) = txn.kind {
            self.transactions.set(row, columns.payment_kind, Cell::text(kind));
        }
        if let Some(category) = txn.category {
            self.transactions
                .set(row, columns.balance_category, Cell::text(category));
        }
        self
    }

    pub fn withdraw_rule(mut self, category: &str) -> Self {
        let column = WorkbookLayout::standard().rules.column;
        self.rules
            .set(self.next_withdraw_rule, column, Cell::text(category));
        self.next_withdraw_rule += 1;
        self
    }

    pub fn available_rule(mut self, category: &str) -> Self {
        let column = WorkbookLayout::standard().rules.column;
        self.rules
            .set(self.next_available_rule, column, Cell::text(category));
        self.next_available_rule += 1;
        self
    }

    pub fn build(self) -> Workbook {
        let mut book = Workbook::new();
        book.add_sheet(self.orders);
        book.add_sheet(self.transactions);
        book.add_sheet(self.rules);
        book
    }
}

pub fn orders(book: &Workbook) -> &Sheet {
    book.sheet(&WorkbookLayout::standard().sheets.orders)
        .expect("order ledger present")
}

pub fn transactions(book: &Workbook) -> &Sheet {
    book.sheet(&WorkbookLayout::standard().sheets.transactions)
        .expect("transaction ledger present")
}
