use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spreadsheet value.
///
/// Every helper on this type is total: callers never have to guess how a cell will be
/// coerced, they ask for the shape they need and get `None` when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Cell {
    Number(Decimal),
    Text(String),
    Date(NaiveDateTime),
    #[default]
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: impl Into<Decimal>) -> Self {
        Cell::Number(value.into())
    }

    /// Midnight on the given calendar day.
    pub fn date(value: NaiveDate) -> Self {
        Cell::Date(value.and_time(NaiveTime::default()))
    }

    /// Empty cells and empty strings count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            Cell::Number(_) | Cell::Date(_) => false,
        }
    }

    /// Calendar day of a date cell; text that merely looks like a date is not a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(value) => Some(value.date()),
            _ => None,
        }
    }

    /// Text form used when a cell acts as a lookup key (order ids, labels, categories).
    pub fn key(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        match self {
            Cell::Text(text) => Some(text.clone()),
            Cell::Number(value) => Some(value.normalize().to_string()),
            Cell::Date(value) => Some(value.to_string()),
            Cell::Empty => None,
        }
    }

    /// True when the cell holds text equal to `label`.
    pub fn is_label(&self, label: &str) -> bool {
        matches!(self, Cell::Text(text) if text == label)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
            Cell::Date(value) => write!(f, "{value}"),
            Cell::Empty => f.write_str("<empty>"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Number(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::date(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn numeric_keys_are_normalized() {
        assert_eq!(Cell::number(dec!(1001.00)).key().as_deref(), Some("1001"));
        assert_eq!(Cell::text("A-17").key().as_deref(), Some("A-17"));
        assert_eq!(Cell::text("").key(), None);
        assert_eq!(Cell::Empty.key(), None);
    }

    #[test]
    fn only_date_cells_yield_dates() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(Cell::date(day).as_date(), Some(day));
        assert_eq!(Cell::text("2025-03-01").as_date(), None);
        assert_eq!(Cell::number(dec!(45717)).as_date(), None);
    }
}
