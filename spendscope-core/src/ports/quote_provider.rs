//! Quote provider port
//!
//! Defines the interface for fetching exchange rates and stock prices from a
//! remote price API.

use crate::domain::result::Result;

/// Remote price source
///
/// Each call is one blocking round trip. Anything short of a usable number
/// (HTTP failure, timeout, error body, missing field) is returned as
/// `Error::QuoteUnavailable` for that symbol.
pub trait QuoteProvider: Send + Sync {
    /// Provider name (e.g., "twelvedata")
    fn name(&self) -> &str;

    /// Rate of one unit of `currency` in `main_currency`
    fn exchange_rate(&self, currency: &str, main_currency: &str) -> Result<f64>;

    /// Latest price of a stock symbol
    fn stock_price(&self, symbol: &str) -> Result<f64>;
}
