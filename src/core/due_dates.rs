use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    ledger::{DueStatus, OrderRecord},
    workbook::{cell_ref, Sheet},
};

use super::payment_index::PaymentIndex;

/// Classification of a single due-date cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentStatus {
    pub row: u32,
    pub column: u32,
    pub cell: String,
    pub order_id: String,
    pub period: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: DueStatus,
}

pub struct DueDateClassifier;

impl DueDateClassifier {
    /// Precedence: invalid due date, then paid (late/early/on time), then unpaid
    /// relative to `today`.
    pub fn classify(
        due_date: Option<NaiveDate>,
        payment_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> DueStatus {
        let Some(due) = due_date else {
            return DueStatus::Invalid;
        };
        match payment_date {
            Some(paid) => match paid.cmp(&due) {
                Ordering::Greater => DueStatus::Late,
                Ordering::Less => DueStatus::Early,
                Ordering::Equal => DueStatus::OnTime,
            },
            None => match today.cmp(&due) {
                Ordering::Equal => DueStatus::BillingDay,
                Ordering::Greater => DueStatus::OverdueUnpaid,
                Ordering::Less => DueStatus::NotYetDue,
            },
        }
    }

    /// Classifies every installment slot of every order.
    pub fn classify_orders<'a>(
        orders: impl IntoIterator<Item = &'a OrderRecord>,
        index: &PaymentIndex,
        today: NaiveDate,
    ) -> Vec<InstallmentStatus> {
        let mut statuses = Vec::new();
        for order in orders {
            for slot in &order.installments {
                let payment = slot
                    .due_date
                    .and_then(|_| index.payment_date(&order.order_id, slot.period.as_deref()));
                statuses.push(InstallmentStatus {
                    row: order.row,
                    column: slot.column,
                    cell: cell_ref(order.row, slot.column),
                    order_id: order.order_id.clone(),
                    period: slot.period.clone(),
                    due_date: slot.due_date,
                    status: Self::classify(slot.due_date, payment, today),
                });
            }
        }
        statuses
    }

    /// Paints each classified cell, replacing whatever fill a previous run left.
    pub fn apply_fills(sheet: &mut Sheet, statuses: &[InstallmentStatus]) {
        for entry in statuses {
            sheet.set_fill(entry.row, entry.column, entry.status.fill_color());
        }
    }
}
