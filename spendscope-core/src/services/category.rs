//! Category report engine - spending in one category over a trailing 3-month window

use chrono::{Local, Months, NaiveDateTime};
use rust_decimal::Decimal;

use crate::domain::dates::{parse_day_first, TIMESTAMP_FORMAT};
use crate::domain::result::Result;
use crate::domain::{round_money, TransactionRecord};

/// Length of the trailing report window
pub const REPORT_MONTHS: u32 = 3;

/// Records of `category` within three months before `as_of`
///
/// `as_of` accepts `DD.MM.YYYY`, `DD/MM/YYYY` and `YYYY-MM-DD`; when absent,
/// the window ends now.
pub fn spending_by_category(
    records: &[TransactionRecord],
    category: &str,
    as_of: Option<&str>,
) -> Result<Vec<TransactionRecord>> {
    let end = match as_of {
        Some(literal) => parse_day_first(literal)?,
        None => Local::now().naive_local(),
    };
    Ok(spending_by_category_at(records, category, end))
}

/// Records of `category` in `[end - 3 months, end]`
///
/// Surviving records have their operation date rewritten as
/// `DD.MM.YYYY HH:MM:SS`. Records without a parsable date are dropped.
pub fn spending_by_category_at(
    records: &[TransactionRecord],
    category: &str,
    end: NaiveDateTime,
) -> Vec<TransactionRecord> {
    // Month subtraction clamps to the last valid day (31 May -> 28/29 Feb)
    let start = end.checked_sub_months(Months::new(REPORT_MONTHS)).unwrap_or(end);

    records
        .iter()
        .filter(|r| r.category.as_deref() == Some(category))
        .filter_map(|r| {
            let ts = r.operation_timestamp()?;
            if ts < start || ts > end {
                return None;
            }
            let mut out = r.clone();
            out.operation_date = Some(ts.format(TIMESTAMP_FORMAT).to_string());
            Some(out)
        })
        .collect()
}

/// Sum of payment amounts in a report, rounded to 2 decimals
pub fn category_total(records: &[TransactionRecord]) -> Decimal {
    round_money(records.iter().map(TransactionRecord::amount_or_zero).sum())
}
