//! Derived views computed from a record batch
//!
//! None of these are stored; every query recomputes them from the records.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::record::{CardKey, TransactionRecord};

/// Key and text of the "no results" marker returned by searches
pub const NOT_FOUND_KEY: &str = "Результаты поиска";
pub const NOT_FOUND_TEXT: &str = "Ничего не нашлось";

/// Records sharing one card id, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct CardGroup {
    pub card: CardKey,
    pub transactions: Vec<TransactionRecord>,
}

/// Spend and cashback of one card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub last_digits: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cashback: Decimal,
}

/// Read-only projection of a record for the top-N list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTransaction {
    /// `DD.MM.YYYY`
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

/// Result of a keyword or phone search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<TransactionRecord>),
    NotFound,
}

impl SearchOutcome {
    /// Wrap matches, mapping an empty list to `NotFound`
    pub fn from_matches(matches: Vec<TransactionRecord>) -> Self {
        if matches.is_empty() {
            SearchOutcome::NotFound
        } else {
            SearchOutcome::Found(matches)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn records(&self) -> &[TransactionRecord] {
        match self {
            SearchOutcome::Found(records) => records,
            SearchOutcome::NotFound => &[],
        }
    }
}

/// `Found` serializes as the record array, `NotFound` as the marker object
impl Serialize for SearchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchOutcome::Found(records) => records.serialize(serializer),
            SearchOutcome::NotFound => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NOT_FOUND_KEY, NOT_FOUND_TEXT)?;
                map.end()
            }
        }
    }
}

/// Round a money amount to two decimals, ties to even (`0.125` -> `0.12`)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// [`round_money`] for floating-point quotes
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(round_money)
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
