//! Currency and stock quotes shown on the dashboard

use std::fmt;

use serde::{Serialize, Serializer};

/// Text shown in place of a quote the provider could not deliver
pub const UNAVAILABLE_TEXT: &str = "Данные отсутствуют";

/// A fetched number, or the absent-data marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteValue {
    Value(f64),
    Unavailable,
}

impl QuoteValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            QuoteValue::Value(v) => Some(*v),
            QuoteValue::Unavailable => None,
        }
    }
}

impl Serialize for QuoteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QuoteValue::Value(v) => serializer.serialize_f64(*v),
            QuoteValue::Unavailable => serializer.serialize_str(UNAVAILABLE_TEXT),
        }
    }
}

impl fmt::Display for QuoteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteValue::Value(v) => write!(f, "{v}"),
            QuoteValue::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

/// Rate of a user currency against the main account currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: QuoteValue,
}

/// Latest price of a stock symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: QuoteValue,
}
