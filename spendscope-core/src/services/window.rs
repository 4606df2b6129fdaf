//! Month-window filter - records from the start of a month up to a reference date

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::dates::parse_reference_date;
use crate::domain::result::Result;
use crate::domain::TransactionRecord;

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Window from the first of `end`'s month through `end`
    pub fn ending_on(end: NaiveDate) -> Self {
        Self {
            start: end.with_day(1).unwrap_or(end),
            end,
        }
    }

    /// Parse a `DD.MM.YYYY` reference date into its window
    pub fn parse(reference_date: &str) -> Result<Self> {
        parse_reference_date(reference_date).map(Self::ending_on)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Records whose operation day falls in the window, in input order
    pub fn select(&self, records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        records
            .iter()
            .filter(|r| self.contains(r.operation_day()))
            .cloned()
            .collect()
    }
}

/// Restrict records to the reference date's month, up to that date
///
/// An unparsable reference date yields an empty result.
pub fn filter_month(records: &[TransactionRecord], reference_date: &str) -> Vec<TransactionRecord> {
    try_filter_month(records, reference_date).unwrap_or_default()
}

/// Like [`filter_month`], but reports an unparsable reference date
pub fn try_filter_month(
    records: &[TransactionRecord],
    reference_date: &str,
) -> Result<Vec<TransactionRecord>> {
    let window = MonthWindow::parse(reference_date)?;
    Ok(window.select(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use rust_decimal::Decimal;

    fn january_2018() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::new("31.12.2017 23:59:59", Decimal::from(-10)).with_card("*5441"),
            TransactionRecord::new("10.01.2018 12:41:24", Decimal::new(-56753, 2))
                .with_card("*5441")
                .with_cashback(Decimal::from(5)),
            TransactionRecord::new("12.01.2018 11:10:05", Decimal::from(-87068))
                .with_card("*4556")
                .with_cashback(Decimal::from(870)),
            TransactionRecord::new("15.01.2018 08:15:55", Decimal::from(-1000))
                .with_card("*4556")
                .with_cashback(Decimal::from(10)),
            TransactionRecord::new("01.02.2018 00:00:01", Decimal::from(500)).with_card("*4556"),
        ]
    }

    #[test]
    fn test_window_bounds() {
        let window = MonthWindow::parse("16.01.2018").unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2018, 1, 16).unwrap());
    }

    #[test]
    fn test_filter_month_includes_reference_day() {
        let records = january_2018();

        let result = filter_month(&records, "12.01.2018");
        assert_eq!(result, records[1..3].to_vec());

        let result = filter_month(&records, "15.01.2018");
        assert_eq!(result, records[1..4].to_vec());
    }

    #[test]
    fn test_filter_month_invalid_date_is_empty() {
        let records = january_2018();
        assert!(filter_month(&records, "12.00.2018").is_empty());
        assert!(matches!(
            try_filter_month(&records, "12.00.2018"),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_missing_dates_fall_back_to_2000() {
        let records = vec![TransactionRecord::default().with_description("no date")];
        assert!(filter_month(&records, "16.01.2018").is_empty());
        assert_eq!(filter_month(&records, "01.01.2000").len(), 1);
    }

    #[test]
    fn test_filter_month_is_idempotent() {
        let records = january_2018();
        let once = filter_month(&records, "15.01.2018");
        let twice = filter_month(&once, "15.01.2018");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_month_empty_input() {
        assert!(filter_month(&[], "15.01.2018").is_empty());
    }
}
