use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::TransactionColumns,
    ledger::{OrderRecord, RuleSet, TransactionRecord},
    workbook::{Cell, Sheet},
};

use super::report::{WarningKind, WarningLog};

/// The two cash positions replayed across the transaction ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalances {
    pub available: Decimal,
    pub withdraw: Decimal,
}

impl RunningBalances {
    /// Applies one movement. The reinvestment-card category always draws the withdrawable
    /// balance down, whatever the rules table says about it.
    ///
    /// Returns `false`, leaving both balances untouched, when the movement would take
    /// either one out of the decimal range.
    pub fn apply(
        &mut self,
        category: Option<&str>,
        amount: Decimal,
        rules: &RuleSet,
        reinvestment_card: &str,
    ) -> bool {
        match self.after(category, amount, rules, reinvestment_card) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    fn after(
        &self,
        category: Option<&str>,
        amount: Decimal,
        rules: &RuleSet,
        reinvestment_card: &str,
    ) -> Option<Self> {
        let mut next = *self;
        let Some(category) = category else {
            return Some(next);
        };
        if rules.counts_toward_available(category) {
            next.available = next.available.checked_add(amount)?;
        }
        if category == reinvestment_card {
            next.withdraw = next.withdraw.checked_sub(amount)?;
        } else if rules.counts_toward_withdraw(category) {
            next.withdraw = next.withdraw.checked_add(amount)?;
        }
        Some(next)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationOutcome {
    pub balances: RunningBalances,
    pub rows_written: usize,
    pub rows_copied: usize,
}

pub struct BalancePropagator;

impl BalancePropagator {
    /// Replays `transactions` in ledger order, writing both running balances on every row
    /// with a readable amount and copying order details onto rows that reference a known
    /// order.
    ///
    /// Rows with an unreadable amount, or one that would overflow a balance, get no
    /// balance written at all; the cells keep whatever they held before.
    #[allow(clippy::too_many_arguments)]
    pub fn propagate<'a, 'b>(
        sheet: &mut Sheet,
        transactions: impl IntoIterator<Item = &'a TransactionRecord>,
        orders: impl IntoIterator<Item = &'b OrderRecord>,
        rules: &RuleSet,
        columns: &TransactionColumns,
        reinvestment_card: &str,
        warnings: &mut WarningLog,
    ) -> PropagationOutcome {
        let details: HashMap<&str, &[Cell]> = orders
            .into_iter()
            .map(|order| (order.order_id.as_str(), order.descriptive_fields.as_slice()))
            .collect();
        info!(
            available_rules = rules.available.len(),
            withdraw_rules = rules.withdraw.len(),
            orders = details.len(),
            "replaying running balances"
        );

        let mut outcome = PropagationOutcome::default();
        for txn in transactions {
            match txn.amount {
                Some(amount) => {
                    let applied = outcome.balances.apply(
                        txn.balance_category.as_deref(),
                        amount,
                        rules,
                        reinvestment_card,
                    );
                    if applied {
                        sheet.set(
                            txn.row,
                            columns.available_balance,
                            Cell::Number(outcome.balances.available),
                        );
                        sheet.set(
                            txn.row,
                            columns.withdraw_balance,
                            Cell::Number(outcome.balances.withdraw),
                        );
                        outcome.rows_written += 1;
                    } else {
                        warnings.record(
                            WarningKind::AmountOverflow,
                            &sheet.name,
                            txn.row,
                            columns.amount,
                            format!("amount {amount} overflows the running balances; row skipped"),
                        );
                    }
                }
                None => warnings.record(
                    WarningKind::UnparseableAmount,
                    &sheet.name,
                    txn.row,
                    columns.amount,
                    format!(
                        "amount `{}` is not a number; running balances not written",
                        txn.amount_raw
                    ),
                ),
            }

            let Some(order_id) = txn.order_id.as_deref() else {
                continue;
            };
            match details.get(order_id) {
                Some(fields) => {
                    for (offset, value) in fields.iter().enumerate() {
                        let column = columns.descriptive_first + offset as u32;
                        sheet.set(txn.row, column, value.clone());
                    }
                    outcome.rows_copied += 1;
                }
                None => warnings.record(
                    WarningKind::UnmatchedOrderReference,
                    &sheet.name,
                    txn.row,
                    columns.order_id,
                    format!("order {order_id} not found in the order ledger"),
                ),
            }
        }
        outcome
    }
}
