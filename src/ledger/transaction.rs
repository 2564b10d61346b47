use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    config::{TransactionColumns, Vocabulary},
    workbook::{Cell, Sheet},
};

use super::amount::parse_amount;

/// What a cash movement pays for, as far as receivables and costs are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentKind {
    Rent,
    FinalPayment,
    DownPayment,
    Disbursement,
    SupplierProfit,
    Other,
}

impl PaymentKind {
    pub fn from_cell(cell: &Cell, vocabulary: &Vocabulary) -> Self {
        let Some(label) = cell.key() else {
            return PaymentKind::Other;
        };
        if label == vocabulary.rent {
            PaymentKind::Rent
        } else if label == vocabulary.final_payment {
            PaymentKind::FinalPayment
        } else if label == vocabulary.down_payment {
            PaymentKind::DownPayment
        } else if label == vocabulary.disbursement {
            PaymentKind::Disbursement
        } else if label == vocabulary.supplier_profit {
            PaymentKind::SupplierProfit
        } else {
            PaymentKind::Other
        }
    }

    /// Rent and final payments settle an installment.
    pub fn settles_installment(self) -> bool {
        matches!(self, PaymentKind::Rent | PaymentKind::FinalPayment)
    }

    pub fn reduces_receivable(self) -> bool {
        matches!(
            self,
            PaymentKind::Rent | PaymentKind::FinalPayment | PaymentKind::DownPayment
        )
    }

    pub fn is_cost(self) -> bool {
        matches!(self, PaymentKind::Disbursement | PaymentKind::SupplierProfit)
    }
}

/// One row of the transaction ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub row: u32,
    pub date: Option<NaiveDate>,
    pub order_id: Option<String>,
    pub period: Option<String>,
    pub amount_raw: Cell,
    pub amount: Option<Decimal>,
    pub payment_kind: PaymentKind,
    pub balance_category: Option<String>,
}

impl TransactionRecord {
    /// Reads every row from `from_row` to the last populated row, in ledger order.
    pub fn read_from(
        sheet: &Sheet,
        columns: &TransactionColumns,
        vocabulary: &Vocabulary,
        from_row: u32,
    ) -> Vec<TransactionRecord> {
        (from_row..=sheet.max_row())
            .map(|row| {
                let amount_raw = sheet.get(row, columns.amount).clone();
                TransactionRecord {
                    row,
                    date: sheet.get(row, columns.date).as_date(),
                    order_id: sheet.get(row, columns.order_id).key(),
                    period: sheet.get(row, columns.period).key(),
                    amount: parse_amount(&amount_raw),
                    amount_raw,
                    payment_kind: PaymentKind::from_cell(
                        sheet.get(row, columns.payment_kind),
                        vocabulary,
                    ),
                    balance_category: sheet.get(row, columns.balance_category).key(),
                }
            })
            .collect()
    }
}
