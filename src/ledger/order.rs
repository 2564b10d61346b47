use chrono::NaiveDate;

use crate::{
    config::OrderColumns,
    workbook::{Cell, Sheet},
};

/// One due-date slot of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentSlot {
    pub column: u32,
    /// Label from the period header row above the column.
    pub period: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// A row of the order ledger with a non-blank order id.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub row: u32,
    pub order_id: String,
    pub descriptive_fields: Vec<Cell>,
    pub initial_receivable: Cell,
    pub installments: Vec<InstallmentSlot>,
}

impl OrderRecord {
    /// Reads every order from `from_row` to the last populated row, skipping blank ids.
    pub fn read_from(sheet: &Sheet, columns: &OrderColumns, from_row: u32) -> Vec<OrderRecord> {
        let periods: Vec<(u32, Option<String>)> = columns
            .due_date_columns()
            .map(|column| (column, sheet.get(columns.period_header_row, column).key()))
            .collect();

        (from_row..=sheet.max_row())
            .filter_map(|row| {
                let order_id = sheet.get(row, columns.order_id).key()?;
                let descriptive_fields = columns
                    .descriptive_columns()
                    .map(|column| sheet.get(row, column).clone())
                    .collect();
                let installments = periods
                    .iter()
                    .map(|(column, period)| InstallmentSlot {
                        column: *column,
                        period: period.clone(),
                        due_date: sheet.get(row, *column).as_date(),
                    })
                    .collect();
                Some(OrderRecord {
                    row,
                    order_id,
                    descriptive_fields,
                    initial_receivable: sheet.get(row, columns.initial_receivable).clone(),
                    installments,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_ids_are_skipped_and_periods_come_from_header() {
        let columns = OrderColumns::default();
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut sheet = Sheet::new("orders");
        sheet.set(4, 14, Cell::text("第一期"));
        sheet.set(5, 2, Cell::text("O1"));
        sheet.set(5, 3, Cell::text("Alice"));
        sheet.set(5, 11, Cell::number(dec!(1000)));
        sheet.set(5, 14, Cell::date(due));
        sheet.set(6, 3, Cell::text("no id"));

        let orders = OrderRecord::read_from(&sheet, &columns, 5);
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.order_id, "O1");
        assert_eq!(order.descriptive_fields.len(), 6);
        assert_eq!(order.descriptive_fields[0], Cell::text("Alice"));
        assert_eq!(order.installments.len(), 10);
        assert_eq!(order.installments[0].period.as_deref(), Some("第一期"));
        assert_eq!(order.installments[0].due_date, Some(due));
        assert_eq!(order.installments[1].due_date, None);
    }
}
