use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    config::OrderColumns,
    ledger::{OrderRecord, TransactionRecord},
    workbook::{Cell, Sheet},
};

use super::report::{WarningKind, WarningLog};

pub struct PeriodOneSummarizer;

impl PeriodOneSummarizer {
    /// Sums first-period amounts per order. Unreadable amounts are left out of the sum
    /// without a warning; amounts that would overflow the sum are left out with one.
    pub fn summarize<'a>(
        transactions: impl IntoIterator<Item = &'a TransactionRecord>,
        first_period_label: &str,
        sheet_name: &str,
        amount_column: u32,
        warnings: &mut WarningLog,
    ) -> HashMap<String, Decimal> {
        let mut sums: HashMap<String, Decimal> = HashMap::new();
        for txn in transactions {
            let Some(order_id) = txn.order_id.as_ref() else {
                continue;
            };
            if txn.period.as_deref() != Some(first_period_label) {
                continue;
            }
            let Some(amount) = txn.amount else {
                continue;
            };
            let sum = sums.entry(order_id.clone()).or_default();
            match sum.checked_add(amount) {
                Some(next) => *sum = next,
                None => warnings.record(
                    WarningKind::AmountOverflow,
                    sheet_name,
                    txn.row,
                    amount_column,
                    format!("amount {amount} overflows the first-period sum of order {order_id}"),
                ),
            }
        }
        info!(orders = sums.len(), "summarized first-period amounts");
        sums
    }

    /// Writes each order's sum, or the no-match sentinel; returns the number of matches.
    pub fn apply<'a>(
        sheet: &mut Sheet,
        orders: impl IntoIterator<Item = &'a OrderRecord>,
        sums: &HashMap<String, Decimal>,
        columns: &OrderColumns,
        no_match: &str,
    ) -> usize {
        let mut matched = 0;
        for order in orders {
            let value = match sums.get(&order.order_id) {
                Some(sum) => {
                    matched += 1;
                    Cell::Number(*sum)
                }
                None => Cell::text(no_match),
            };
            sheet.set(order.row, columns.period_one_amount, value);
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::PaymentKind;
    use rust_decimal_macros::dec;

    fn txn(order: &str, period: &str, amount: Option<Decimal>) -> TransactionRecord {
        TransactionRecord {
            row: 2,
            date: None,
            order_id: Some(order.into()),
            period: Some(period.into()),
            amount_raw: Cell::Empty,
            amount,
            payment_kind: PaymentKind::Rent,
            balance_category: None,
        }
    }

    #[test]
    fn first_period_rows_add_together() {
        let rows = vec![
            txn("O1", "第一期", Some(dec!(300))),
            txn("O1", "第一期", Some(dec!(200))),
            txn("O1", "第一期", None),
            txn("O1", "第二期", Some(dec!(999))),
            txn("O2", "第二期", Some(dec!(5))),
        ];
        let mut warnings = WarningLog::new();
        let sums = PeriodOneSummarizer::summarize(&rows, "第一期", "flow", 9, &mut warnings);
        assert_eq!(sums.get("O1"), Some(&dec!(500)));
        assert_eq!(sums.get("O2"), None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn overflowing_amount_keeps_the_sum_so_far() {
        let rows = vec![
            txn("O1", "第一期", Some(Decimal::MAX)),
            txn("O1", "第一期", Some(dec!(1))),
        ];
        let mut warnings = WarningLog::new();
        let sums = PeriodOneSummarizer::summarize(&rows, "第一期", "flow", 9, &mut warnings);
        assert_eq!(sums.get("O1"), Some(&Decimal::MAX));
        assert_eq!(warnings.entries()[0].kind, WarningKind::AmountOverflow);
    }

    #[test]
    fn orders_without_entries_get_sentinel() {
        let columns = OrderColumns::default();
        let orders: Vec<OrderRecord> = ["O1", "O2"]
            .iter()
            .enumerate()
            .map(|(idx, id)| OrderRecord {
                row: 2 + idx as u32,
                order_id: id.to_string(),
                descriptive_fields: Vec::new(),
                initial_receivable: Cell::Empty,
                installments: Vec::new(),
            })
            .collect();
        let sums = HashMap::from([("O1".to_string(), dec!(500))]);
        let mut sheet = Sheet::new("orders");

        let matched =
            PeriodOneSummarizer::apply(&mut sheet, &orders, &sums, &columns, "未找到匹配");

        assert_eq!(matched, 1);
        assert_eq!(sheet.get(2, 24), &Cell::number(dec!(500)));
        assert_eq!(sheet.get(3, 24), &Cell::text("未找到匹配"));
    }
}
