use std::str::FromStr;

use rust_decimal::Decimal;

use crate::workbook::Cell;

/// Reads a signed amount from a cell.
///
/// Numbers pass through. Text is reduced to its digits, `.` and `-` before parsing, so
/// currency symbols and grouping separators (`¥1,200.50`) are tolerated. Anything else,
/// including text with nothing numeric left, yields `None`.
///
/// Values are exact decimals, not floats: text whose integer part does not fit the 96-bit
/// mantissa (about 28 digits) yields `None` rather than an approximation.
pub fn parse_amount(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(value) => Some(*value),
        Cell::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
                .collect();
            Decimal::from_str(&cleaned).ok()
        }
        Cell::Date(_) | Cell::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(parse_amount(&Cell::number(dec!(-42.5))), Some(dec!(-42.5)));
    }

    #[test]
    fn currency_noise_is_stripped() {
        assert_eq!(parse_amount(&Cell::text("¥1,200.50")), Some(dec!(1200.50)));
        assert_eq!(parse_amount(&Cell::text(" -300 元")), Some(dec!(-300)));
        assert_eq!(parse_amount(&Cell::text("$ 7")), Some(dec!(7)));
    }

    #[test]
    fn unparseable_values_yield_none() {
        assert_eq!(parse_amount(&Cell::text("N/A")), None);
        assert_eq!(parse_amount(&Cell::text("")), None);
        assert_eq!(parse_amount(&Cell::text("1.2.3")), None);
        assert_eq!(parse_amount(&Cell::Empty), None);
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(parse_amount(&Cell::date(day)), None);
    }

    #[test]
    fn integers_wider_than_the_mantissa_yield_none() {
        assert_eq!(
            parse_amount(&Cell::text("79228162514264337593543950335")),
            Some(Decimal::MAX)
        );
        assert_eq!(parse_amount(&Cell::text("100000000000000000000000000000")), None);
    }
}
