//! Transaction record domain model
//!
//! Field names are the bank's spreadsheet header verbatim, so a record read
//! from an export serializes back to the same flat mapping in reports.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::dates::{parse_day_first, DATE_FORMAT};

/// Date used when a record carries no usable operation date
pub const FALLBACK_DATE: &str = "01.01.2000";

/// Placeholder card id for records without a card number
pub const UNKNOWN_CARD: &str = "----";

/// A single row of a bank account export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `DD.MM.YYYY HH:MM:SS`
    #[serde(
        rename = "Дата операции",
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_date: Option<String>,

    /// `*NNNN`
    #[serde(
        rename = "Номер карты",
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_number: Option<String>,

    #[serde(
        rename = "Категория",
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(
        rename = "Описание",
        default,
        deserialize_with = "deserialize_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Negative for spend, positive for incoming money
    #[serde(
        rename = "Сумма платежа",
        default,
        deserialize_with = "deserialize_optional_amount",
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,

    #[serde(
        rename = "Кэшбэк",
        default,
        deserialize_with = "deserialize_optional_amount",
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub cashback: Option<Decimal>,

    /// Columns the engines don't interpret (status, currency, MCC, ...)
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl TransactionRecord {
    /// Create a record with an operation date and amount
    pub fn new(operation_date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            operation_date: Some(operation_date.into()),
            amount: Some(amount),
            ..Default::default()
        }
    }

    pub fn with_card(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cashback(mut self, cashback: Decimal) -> Self {
        self.cashback = Some(cashback);
        self
    }

    /// Date part of the operation date (text before the first space)
    pub fn date_token(&self) -> &str {
        self.operation_date
            .as_deref()
            .and_then(|d| d.split_whitespace().next())
            .unwrap_or(FALLBACK_DATE)
    }

    /// Calendar day of the operation, `01.01.2000` when missing or malformed
    pub fn operation_day(&self) -> NaiveDate {
        NaiveDate::parse_from_str(self.date_token(), DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(FALLBACK_DATE, DATE_FORMAT))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Full operation timestamp, if the date parses in any accepted spelling
    pub fn operation_timestamp(&self) -> Option<NaiveDateTime> {
        self.operation_date
            .as_deref()
            .and_then(|d| parse_day_first(d).ok())
    }

    pub fn card_key(&self) -> CardKey {
        CardKey::from_raw(self.card_number.as_deref())
    }

    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }

    pub fn cashback_or_zero(&self) -> Decimal {
        self.cashback.unwrap_or(Decimal::ZERO)
    }

    pub fn category_text(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Grouping key for the card aggregator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardKey {
    /// Raw `Номер карты` value including its `*` prefix
    Known(String),
    /// No card number on the record
    Unknown,
}

impl CardKey {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(UNKNOWN_CARD) => CardKey::Unknown,
            Some(s) if s.eq_ignore_ascii_case("nan") => CardKey::Unknown,
            Some(s) => CardKey::Known(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CardKey::Known(card) => card,
            CardKey::Unknown => UNKNOWN_CARD,
        }
    }

    /// Card id with its leading marker character dropped
    pub fn last_digits(&self) -> String {
        self.as_str().chars().skip(1).collect()
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept strings, numbers and booleans for text columns
///
/// Spreadsheet cells that look numeric (a category of `101`) still compare as text.
fn deserialize_optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(JsonValue::String(s)) => Some(s),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        Some(JsonValue::Bool(b)) => Some(b.to_string()),
        Some(JsonValue::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

/// Accept numbers or numeric text for amount columns
///
/// Text that does not parse (or parses to NaN) is treated as a missing value.
/// Spreadsheet floats keep their shortest decimal spelling (`-567.53`, not the
/// binary expansion).
fn deserialize_optional_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(JsonValue::Number(n)) => n.as_f64().and_then(Decimal::from_f64),
        Some(JsonValue::String(s)) => parse_amount_text(&s),
        _ => None,
    })
}

/// Parse amount text such as `-1 234,56`
pub fn parse_amount_text(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            '\u{2212}' => '-',
            other => other,
        })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
