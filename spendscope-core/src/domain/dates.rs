//! Date literal parsing
//!
//! Statements and users write dates day-first (`31.03.2023`). Reference dates
//! for the month window are parsed strictly; the category report accepts the
//! other common spellings as well.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::result::{Error, Result};

/// Date-only format used in statements and prompts
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Full timestamp format used in statements and reports
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Parse a strict `DD.MM.YYYY` literal
pub fn parse_reference_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| Error::invalid_date(input))
}

/// Parse a day-first date or timestamp in any of the accepted spellings
///
/// A literal without a time of day resolves to midnight.
pub fn parse_day_first(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(ts);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(Error::invalid_date(input))
}
