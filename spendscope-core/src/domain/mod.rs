//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with parsing rules - no I/O or external dependencies.

pub mod dates;
mod quote;
mod record;
pub mod result;
mod summary;

pub use quote::{CurrencyRate, QuoteValue, StockPrice, UNAVAILABLE_TEXT};
pub use record::{parse_amount_text, CardKey, TransactionRecord, FALLBACK_DATE, UNKNOWN_CARD};
pub use summary::{
    round2, round_money, CardGroup, CardSummary, SearchOutcome, TopTransaction, NOT_FOUND_KEY,
    NOT_FOUND_TEXT,
};
