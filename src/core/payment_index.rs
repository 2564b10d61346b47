use std::collections::{hash_map::Entry, HashMap};

use chrono::NaiveDate;

use crate::ledger::TransactionRecord;

/// Earliest-recorded settling payment per (order, period).
///
/// Only dated rent/final-payment rows count, and the first such row in ledger order wins;
/// later rows for the same key are ignored even if they are dated earlier.
#[derive(Debug, Clone, Default)]
pub struct PaymentIndex {
    first_payment: HashMap<(String, Option<String>), NaiveDate>,
}

impl PaymentIndex {
    pub fn build<'a>(transactions: impl IntoIterator<Item = &'a TransactionRecord>) -> Self {
        let mut first_payment = HashMap::new();
        for txn in transactions {
            if !txn.payment_kind.settles_installment() {
                continue;
            }
            let (Some(date), Some(order_id)) = (txn.date, txn.order_id.as_ref()) else {
                continue;
            };
            if let Entry::Vacant(slot) = first_payment.entry((order_id.clone(), txn.period.clone()))
            {
                slot.insert(date);
            }
        }
        Self { first_payment }
    }

    pub fn payment_date(&self, order_id: &str, period: Option<&str>) -> Option<NaiveDate> {
        self.first_payment
            .get(&(order_id.to_string(), period.map(str::to_string)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.first_payment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_payment.is_empty()
    }
}
