use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    config::OrderColumns,
    ledger::{parse_amount, OrderRecord, TransactionRecord},
    workbook::{Cell, Sheet},
};

use super::report::{WarningKind, WarningLog};

/// Per-order sums collected from the transaction ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceivableTotals {
    pub receivables_paid: HashMap<String, Decimal>,
    pub costs: HashMap<String, Decimal>,
}

impl ReceivableTotals {
    pub fn paid(&self, order_id: &str) -> Decimal {
        self.receivables_paid
            .get(order_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn cost(&self, order_id: &str) -> Decimal {
        self.costs.get(order_id).copied().unwrap_or_default()
    }
}

pub struct ReceivableAggregator;

fn accumulate(total: Decimal, amount: Decimal, applies: bool) -> Option<Decimal> {
    if applies {
        total.checked_add(amount)
    } else {
        Some(total)
    }
}

impl ReceivableAggregator {
    /// Sums receivable-bearing amounts and absolute cost amounts per order.
    ///
    /// Rows without an order id are skipped silently. Rows with an unreadable amount, or
    /// whose amount would push a sum out of the decimal range, are skipped with a warning.
    pub fn aggregate<'a>(
        transactions: impl IntoIterator<Item = &'a TransactionRecord>,
        sheet_name: &str,
        amount_column: u32,
        warnings: &mut WarningLog,
    ) -> ReceivableTotals {
        let mut totals = ReceivableTotals::default();
        for txn in transactions {
            let Some(order_id) = txn.order_id.as_ref() else {
                continue;
            };
            let Some(amount) = txn.amount else {
                warnings.record(
                    WarningKind::UnparseableAmount,
                    sheet_name,
                    txn.row,
                    amount_column,
                    format!(
                        "amount `{}` is not a number; row skipped for receivables and costs",
                        txn.amount_raw
                    ),
                );
                continue;
            };
            let reduces = txn.payment_kind.reduces_receivable();
            let is_cost = txn.payment_kind.is_cost();
            let paid = accumulate(totals.paid(order_id), amount, reduces);
            let cost = accumulate(totals.cost(order_id), amount.abs(), is_cost);
            let (Some(paid), Some(cost)) = (paid, cost) else {
                warnings.record(
                    WarningKind::AmountOverflow,
                    sheet_name,
                    txn.row,
                    amount_column,
                    format!(
                        "amount {amount} overflows the running total of order {order_id}; \
                         row skipped for receivables and costs"
                    ),
                );
                continue;
            };
            if reduces {
                totals.receivables_paid.insert(order_id.clone(), paid);
            }
            if is_cost {
                totals.costs.insert(order_id.clone(), cost);
            }
        }
        info!(
            receivable_orders = totals.receivables_paid.len(),
            cost_orders = totals.costs.len(),
            "aggregated receivables and costs"
        );
        totals
    }

    /// Writes current receivable and total cost onto each order row; returns rows written.
    ///
    /// An unreadable initial receivable is copied verbatim into the current receivable
    /// column, with a warning.
    pub fn apply<'a>(
        sheet: &mut Sheet,
        orders: impl IntoIterator<Item = &'a OrderRecord>,
        totals: &ReceivableTotals,
        columns: &OrderColumns,
        warnings: &mut WarningLog,
    ) -> usize {
        let mut written = 0;
        for order in orders {
            let initial = parse_amount(&order.initial_receivable);
            let current = match initial.map(|v| v.checked_sub(totals.paid(&order.order_id))) {
                Some(Some(current)) => Cell::Number(current),
                Some(None) => {
                    warnings.record(
                        WarningKind::AmountOverflow,
                        &sheet.name,
                        order.row,
                        columns.initial_receivable,
                        format!(
                            "receivable of order {} is out of range after payments; copied as is",
                            order.order_id
                        ),
                    );
                    order.initial_receivable.clone()
                }
                None => {
                    warnings.record(
                        WarningKind::UnparseableReceivable,
                        &sheet.name,
                        order.row,
                        columns.initial_receivable,
                        format!(
                            "initial receivable `{}` of order {} is not a number; copied as is",
                            order.initial_receivable, order.order_id
                        ),
                    );
                    order.initial_receivable.clone()
                }
            };
            sheet.set(order.row, columns.current_receivable, current);
            sheet.set(
                order.row,
                columns.total_cost,
                Cell::Number(totals.cost(&order.order_id)),
            );
            written += 1;
        }
        written
    }
}
